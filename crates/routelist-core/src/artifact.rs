//! Serialised rule artifacts: header block plus rule body.

use crate::dialect::{transform, Dialect};
use crate::header::build_header;
use crate::types::{RuleRecord, TypeCounts, Vocabulary};

/// A complete rule file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `#` comment lines
    pub header: Vec<String>,
    /// Rule lines
    pub body: Vec<String>,
}

impl Artifact {
    /// Canonical artifact for already ordered rules.
    pub fn canonical(name: &str, meta: &[String], rules: &[RuleRecord]) -> Self {
        let counts = TypeCounts::tally(Vocabulary::Domain, rules.iter().map(RuleRecord::type_str));
        Self {
            header: build_header(name, meta, &counts),
            body: rules.iter().map(ToString::to_string).collect(),
        }
    }

    /// Artifact for one dialect, with counts taken over the emitted lines.
    pub fn for_dialect(
        dialect: Dialect,
        name: &str,
        meta: &[String],
        rules: &[RuleRecord],
        group: &str,
    ) -> Self {
        let projection = transform(dialect, rules, group);
        Self {
            header: build_header(name, meta, &projection.counts),
            body: projection.lines,
        }
    }

    /// File text: one line each, no blank lines, newline terminated.
    pub fn render(&self) -> String {
        render_lines(self.header.iter().chain(self.body.iter()))
    }
}

/// Join lines with a trailing newline after each one.
pub fn render_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}
