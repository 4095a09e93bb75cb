//! Comment header preceding every rule artifact.
//!
//! ```text
//! # NAME: <name>
//! <metadata lines, verbatim>
//! # <TYPE>: <count>      one per non-zero type
//! # TOTAL: <sum>
//! ```
//!
//! Name, count and total lines are always regenerated. When an existing
//! header is reused as metadata, [`strip_generated`] removes them first.

use std::collections::BTreeSet;

use crate::config::CorpusConfig;
use crate::types::{TypeCounts, Vocabulary};

const NAME_PREFIX: &str = "# NAME:";
const TOTAL_PREFIX: &str = "# TOTAL:";

/// Build the header lines for an artifact.
pub fn build_header(name: &str, meta: &[String], counts: &TypeCounts) -> Vec<String> {
    let mut header = Vec::with_capacity(meta.len() + 12);
    header.push(format!("{NAME_PREFIX} {name}"));
    header.extend(meta.iter().cloned());

    let mut total = 0;
    for (type_name, count) in counts.ordered() {
        header.push(format!("# {type_name}: {count}"));
        total += count;
    }
    header.push(format!("{TOTAL_PREFIX} {total}"));
    header
}

/// Returns true for a `# NAME:` or `# TOTAL:` line, or a `# <TYPE>: <n>` count
/// line whose type is a known rule type or one of `body_types`.
///
/// Other numeric lines such as `# SCHEMA: 2` are metadata and are kept.
pub fn is_generated_line(line: &str, body_types: &BTreeSet<&str>) -> bool {
    if line.starts_with(NAME_PREFIX) || line.starts_with(TOTAL_PREFIX) {
        return true;
    }
    let Some(body) = line.strip_prefix("# ") else {
        return false;
    };
    let Some((key, count)) = body.split_once(": ") else {
        return false;
    };
    let count = count.trim();
    let is_type = [Vocabulary::Domain, Vocabulary::Host]
        .iter()
        .any(|v| v.order().iter().any(|t| *t == key))
        || body_types.contains(key);
    is_type && !count.is_empty() && count.chars().all(|c| c.is_ascii_digit())
}

/// Metadata lines of an existing header: everything except name, counts and total.
///
/// `body_types` are the type names of the rules the header was written for,
/// so counts of unrecognised types are stripped as well.
pub fn strip_generated<'a, I>(header: &[String], body_types: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let body_types: BTreeSet<&str> = body_types.into_iter().collect();
    header
        .iter()
        .filter(|line| !is_generated_line(line, &body_types))
        .cloned()
        .collect()
}

/// Metadata block written by the sync step.
pub fn sync_metadata(config: &CorpusConfig, updated: &str) -> Vec<String> {
    let mut meta = vec![
        format!("# AUTHOR: {}", config.author),
        format!("# REPO: {}", config.repository),
        format!("# SOURCE: {}", config.source),
        format!("# INCLUDED-CORE: {}", config.core_sources.join(", ")),
        String::from("# INCLUDED-UPSTREAM-EXTRA: see README"),
        String::from("# INCLUDED-CUSTOM: see README"),
        format!("# UPDATED: {updated}"),
    ];
    meta.extend(config.extra_meta.iter().map(|line| {
        if line.starts_with('#') {
            line.clone()
        } else {
            format!("# {line}")
        }
    }));
    meta
}
