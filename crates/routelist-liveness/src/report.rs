//! Human-readable run report and plain candidate list.

use crate::state::RunSummary;

/// Markdown report for one run.
pub fn render_report(summary: &RunSummary) -> String {
    let mut lines = vec![
        format!(
            "# NXDOMAIN Report ({})",
            summary.generated_at.format("%Y-%m-%d %H:%M:%SZ")
        ),
        String::new(),
        format!("Checked domains: {}", summary.checked),
        format!("OK: {}", summary.ok),
        format!("NXDOMAIN: {}", summary.nxdomain),
        format!("UNKNOWN: {}", summary.unknown),
        String::new(),
        format!("Threshold: {} consecutive NXDOMAIN", summary.threshold),
        String::new(),
        String::from("## Candidates"),
    ];
    push_listing(&mut lines, &summary.candidates);
    lines.push(String::new());
    lines.push(String::from("## Unknowns"));
    push_listing(&mut lines, &summary.unknowns);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_listing(lines: &mut Vec<String>, domains: &[String]) {
    if domains.is_empty() {
        lines.push(String::from("- (none)"));
    } else {
        lines.extend(domains.iter().map(|d| format!("- {d}")));
    }
}

/// One candidate per line; empty when there are none.
pub fn render_candidates(summary: &RunSummary) -> String {
    summary
        .candidates
        .iter()
        .map(|d| format!("{d}\n"))
        .collect()
}
