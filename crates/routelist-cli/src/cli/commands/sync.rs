//! `routelist sync` - Merge upstream, extra and custom rules.

use anyhow::{Context as _, Result};
use colored::Colorize;
use routelist_core::artifact::render_lines;
use routelist_core::header::sync_metadata;
use routelist_core::{collect_core, merge_corpus, parse_rules, Artifact, Dialect, RuleRecord, RuleSet};
use serde::Serialize;
use tracing::info;

use super::Context;
use crate::cli::args::SyncArgs;
use crate::files;
use crate::layout::UpstreamTree;

/// What a sync run produced.
#[derive(Debug, Serialize)]
struct SyncSummary {
    list: String,
    core_sources: usize,
    core_rules: usize,
    extra_candidates: usize,
    extra_verified: usize,
    custom_rules: usize,
    merged: usize,
    resolve: usize,
    missing: Vec<String>,
    custom_refreshed: bool,
}

pub fn execute(ctx: &Context, args: &SyncArgs) -> Result<()> {
    let corpus = &ctx.config.corpus;
    corpus.validate()?;
    let layout = ctx.layout();
    let list = ctx.list_name();

    let upstream = UpstreamTree::new(&args.upstream);
    let core = collect_core(&upstream, &corpus.core_sources)
        .context("failed to collect core sources")?;
    let universe = upstream
        .universe()
        .with_context(|| format!("failed to index upstream {}", args.upstream.display()))?;

    let extra_path = layout.extra_rules_path();
    let extras = files::read_optional(&extra_path)
        .with_context(|| format!("failed to read {}", extra_path.display()))?
        .map(|text| parse_rules(&text))
        .unwrap_or_default();

    let custom_path = layout.custom_path(list, &corpus.custom_name());
    let custom: RuleSet = files::read_optional(&custom_path)
        .with_context(|| format!("failed to read {}", custom_path.display()))?
        .map(|text| parse_rules(&text).into_iter().collect())
        .unwrap_or_default();

    let outcome = merge_corpus(&core, &extras, &custom, &universe);

    let updated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let meta = sync_metadata(corpus, &updated);

    let merged = outcome.merged_list();
    let canonical = Artifact::canonical(list, &meta, &merged);
    files::write_text(&layout.list_path(Dialect::Surge, list), &canonical.render())?;

    let resolve_name = corpus.resolve_name();
    let resolve = outcome.resolve_view();
    let resolve_artifact = Artifact::canonical(&resolve_name, &meta, &resolve);
    files::write_text(&layout.resolve_path(list, &resolve_name), &resolve_artifact.render())?;

    if args.refresh_custom {
        let refreshed = outcome.refreshed_custom(&core);
        files::write_text(&custom_path, &render_lines(refreshed.iter().map(RuleRecord::as_str)))?;
        info!(rules = refreshed.len(), path = %custom_path.display(), "custom list refreshed");
    }

    files::write_text(
        &layout.missing_path(),
        &render_lines(outcome.missing.iter().map(RuleRecord::as_str)),
    )?;

    info!(list, merged = merged.len(), resolve = resolve.len(), "sync complete");

    let summary = SyncSummary {
        list: list.to_string(),
        core_sources: corpus.core_sources.len(),
        core_rules: core.len(),
        extra_candidates: extras.len(),
        extra_verified: outcome.verified_extra.len(),
        custom_rules: custom.len(),
        merged: merged.len(),
        resolve: resolve.len(),
        missing: outcome.missing.iter().map(ToString::to_string).collect(),
        custom_refreshed: args.refresh_custom,
    };

    if !ctx.output_format.print_structured(&summary)? {
        print_pretty(&summary);
    }
    Ok(())
}

fn print_pretty(summary: &SyncSummary) {
    println!("{} {}", "Synced".green().bold(), summary.list.cyan().bold());
    println!(
        "  {:<16} {} rules from {} lists",
        "Core:".bold(),
        summary.core_rules,
        summary.core_sources
    );
    println!(
        "  {:<16} {} of {} verified upstream",
        "Extra:".bold(),
        summary.extra_verified,
        summary.extra_candidates
    );
    println!("  {:<16} {}", "Custom:".bold(), summary.custom_rules);
    println!("  {:<16} {}", "Merged:".bold(), summary.merged.to_string().cyan());
    println!("  {:<16} {}", "Resolve:".bold(), summary.resolve.to_string().cyan());

    if summary.custom_refreshed {
        println!("  {}", "Custom list rewritten".dimmed());
    }

    if !summary.missing.is_empty() {
        println!();
        println!(
            "{} {} extra rules not found upstream:",
            "Warning:".yellow().bold(),
            summary.missing.len()
        );
        for rule in &summary.missing {
            println!("  {}", rule.yellow());
        }
    }
}
