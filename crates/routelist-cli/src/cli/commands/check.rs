//! `routelist check` - DNS liveness of every domain rule.

use anyhow::{Context as _, Result};
use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use routelist_core::{parse_rules, Dialect};
use routelist_liveness::{
    advance_run, extract_domains, render_candidates, render_report, DomainStatus,
    LivenessChecker, LivenessState, RunSummary,
};
use tracing::info;

use super::Context;
use crate::files;
use crate::output::OutputFormat;

pub async fn execute(ctx: &Context) -> Result<()> {
    let liveness = &ctx.config.liveness;
    let layout = ctx.layout();
    let list = ctx.list_name();

    let source_path = layout.list_path(Dialect::Surge, list);
    let rules = parse_rules(&files::read_required(&source_path)?);
    let domains = extract_domains(&rules);

    let state_path = layout.state_path();
    let prior = match files::read_optional(&state_path)
        .with_context(|| format!("failed to read {}", state_path.display()))?
    {
        Some(text) => LivenessState::from_json(&text)
            .with_context(|| format!("refusing to overwrite {}", state_path.display()))?,
        None => LivenessState::default(),
    };

    let checker = LivenessChecker::from_config(liveness)?;
    info!(
        domains = domains.len(),
        resolvers = liveness.resolvers.len(),
        concurrency = liveness.concurrency,
        "checking domains"
    );

    let progress = progress_bar(ctx, domains.len())?;
    let results = checker
        .check_all_with(&domains, |domain, status| {
            if status == DomainStatus::Nxdomain {
                progress.set_message(domain.to_string());
            }
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    let outcome = advance_run(&prior, &results, liveness.threshold, Utc::now());

    files::write_text(&state_path, &outcome.state.to_json()?)?;
    files::write_text(&layout.report_path(), &render_report(&outcome.summary))?;
    files::write_text(&layout.candidates_path(), &render_candidates(&outcome.summary))?;

    let summary = outcome.summary;
    info!(
        checked = summary.checked,
        ok = summary.ok,
        nxdomain = summary.nxdomain,
        unknown = summary.unknown,
        candidates = summary.candidates.len(),
        "check complete"
    );

    if !ctx.output_format.print_structured(&summary)? {
        print_pretty(&summary);
    }
    Ok(())
}

fn progress_bar(ctx: &Context, len: usize) -> Result<ProgressBar> {
    if ctx.output_format != OutputFormat::Pretty {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    Ok(pb)
}

fn print_pretty(summary: &RunSummary) {
    println!(
        "{} {} domains",
        "Checked".green().bold(),
        summary.checked.to_string().cyan().bold()
    );
    println!("  {:<10} {}", "OK:".bold(), summary.ok.to_string().green());
    println!("  {:<10} {}", "NXDOMAIN:".bold(), summary.nxdomain.to_string().red());
    println!("  {:<10} {}", "UNKNOWN:".bold(), summary.unknown.to_string().yellow());

    println!();
    println!(
        "{} (>= {} consecutive NXDOMAIN):",
        "Removal candidates".bold(),
        summary.threshold
    );
    if summary.candidates.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for domain in &summary.candidates {
        println!("  {}", domain.red());
    }

    if !summary.unknowns.is_empty() {
        println!();
        println!("{}", "Inconclusive this run:".bold());
        for domain in &summary.unknowns {
            println!("  {}", domain.yellow());
        }
    }
}
