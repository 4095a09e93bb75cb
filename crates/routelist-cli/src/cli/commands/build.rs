//! `routelist build` - Project the canonical list into every dialect.

use anyhow::Result;
use colored::Colorize;
use routelist_core::header::strip_generated;
use routelist_core::{canonicalize, parse_rule_file, Artifact, Dialect, RuleRecord};
use serde::Serialize;
use tracing::info;

use super::Context;
use crate::files;

#[derive(Debug, Serialize)]
struct DialectOutput {
    dialect: &'static str,
    path: String,
    rules: usize,
}

#[derive(Debug, Serialize)]
struct BuildSummary {
    list: String,
    source_rules: usize,
    outputs: Vec<DialectOutput>,
}

pub fn execute(ctx: &Context) -> Result<()> {
    let corpus = &ctx.config.corpus;
    corpus.validate()?;
    let layout = ctx.layout();
    let list = ctx.list_name();

    let source_path = layout.list_path(Dialect::Surge, list);
    let file = parse_rule_file(&files::read_required(&source_path)?);
    let meta = strip_generated(&file.header, file.rules.iter().map(RuleRecord::type_str));
    let rules = canonicalize(file.rules);

    let mut outputs = Vec::new();
    for dialect in Dialect::ALL {
        // Surge is the source itself.
        if dialect == Dialect::Surge {
            continue;
        }
        let artifact = Artifact::for_dialect(dialect, list, &meta, &rules, corpus.group());
        let path = layout.list_path(dialect, list);
        files::write_text(&path, &artifact.render())?;
        info!(%dialect, rules = artifact.body.len(), "dialect written");
        outputs.push(DialectOutput {
            dialect: dialect.name(),
            path: path.display().to_string(),
            rules: artifact.body.len(),
        });
    }

    let summary = BuildSummary {
        list: list.to_string(),
        source_rules: rules.len(),
        outputs,
    };

    if !ctx.output_format.print_structured(&summary)? {
        println!(
            "{} {} ({} rules)",
            "Built".green().bold(),
            summary.list.cyan().bold(),
            summary.source_rules
        );
        for out in &summary.outputs {
            println!("  {:<14} {:>6}  {}", out.dialect.bold(), out.rules, out.path.dimmed());
        }
    }
    Ok(())
}
