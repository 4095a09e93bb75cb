//! Corpus merging across provenance buckets.
//!
//! `merged = core ∪ verified extras ∪ custom`, with set semantics on rule
//! text. Extras are only trusted when the exact line exists somewhere
//! upstream; the rest are reported as missing.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{CorpusError, Result};
use crate::order::canonicalize;
use crate::types::{parse_rules, RuleRecord};

/// Unordered set of rules keyed by their text.
pub type RuleSet = HashSet<RuleRecord>;

/// Where named core source lists come from.
pub trait SourceProvider {
    /// Human-readable location of a source, used in error messages.
    fn location(&self, name: &str) -> String;

    /// Text of a source, or `None` if it does not exist.
    fn fetch(&self, name: &str) -> Result<Option<String>>;
}

/// Load and union every core source.
///
/// Fails on the first missing source; no partial set is returned.
pub fn collect_core<P>(provider: &P, names: &[String]) -> Result<RuleSet>
where
    P: SourceProvider + ?Sized,
{
    let mut core = RuleSet::new();
    for name in names {
        let Some(text) = provider.fetch(name)? else {
            return Err(CorpusError::MissingSource {
                name: name.clone(),
                location: provider.location(name),
            });
        };
        let rules = parse_rules(&text);
        debug!(source = %name, rules = rules.len(), "loaded core source");
        core.extend(rules);
    }
    Ok(core)
}

/// Result of a merge.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Union of all trusted rules
    pub merged: RuleSet,
    /// Extra candidates confirmed upstream
    pub verified_extra: RuleSet,
    /// Extra candidates not found upstream, canonically ordered
    pub missing: Vec<RuleRecord>,
}

impl MergeOutcome {
    /// The merged corpus in canonical order.
    pub fn merged_list(&self) -> Vec<RuleRecord> {
        canonicalize(self.merged.iter().cloned())
    }

    /// The merged corpus with `no-resolve` stripped and duplicates collapsed.
    pub fn resolve_view(&self) -> Vec<RuleRecord> {
        resolve_view(&self.merged)
    }

    /// What the custom bucket must contain to reproduce `merged`:
    /// `merged − core − verified extras`, canonically ordered.
    pub fn refreshed_custom(&self, core: &RuleSet) -> Vec<RuleRecord> {
        canonicalize(
            self.merged
                .iter()
                .filter(|r| !core.contains(*r) && !self.verified_extra.contains(*r))
                .cloned(),
        )
    }
}

/// Merge the three provenance buckets.
///
/// `upstream` is every rule line published upstream; an extra candidate is
/// merged only if it is a member.
pub fn merge_corpus(
    core: &RuleSet,
    extra_candidates: &[RuleRecord],
    custom: &RuleSet,
    upstream: &RuleSet,
) -> MergeOutcome {
    let mut verified_extra = RuleSet::new();
    let mut missing = Vec::new();

    for candidate in extra_candidates {
        if upstream.contains(candidate) {
            verified_extra.insert(candidate.clone());
        } else {
            warn!(rule = %candidate, "extra rule not found upstream");
            missing.push(candidate.clone());
        }
    }

    let mut merged = RuleSet::with_capacity(core.len() + verified_extra.len() + custom.len());
    merged.extend(core.iter().cloned());
    merged.extend(verified_extra.iter().cloned());
    merged.extend(custom.iter().cloned());

    debug!(
        core = core.len(),
        extra = verified_extra.len(),
        custom = custom.len(),
        merged = merged.len(),
        "merged corpus"
    );

    MergeOutcome {
        merged,
        verified_extra,
        missing: canonicalize(missing),
    }
}

/// Strip `no-resolve` from every rule and deduplicate.
///
/// Rules differing only by that modifier collapse into one, so the result is
/// never larger than the input.
pub fn resolve_view(rules: &RuleSet) -> Vec<RuleRecord> {
    canonicalize(rules.iter().map(RuleRecord::without_no_resolve))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn set(lines: &[&str]) -> RuleSet {
        lines.iter().map(|l| RuleRecord::parse(l)).collect()
    }

    fn list(lines: &[&str]) -> Vec<RuleRecord> {
        lines.iter().map(|l| RuleRecord::parse(l)).collect()
    }

    fn texts(rules: &[RuleRecord]) -> Vec<&str> {
        rules.iter().map(RuleRecord::as_str).collect()
    }

    struct MapProvider(HashMap<&'static str, &'static str>);

    impl SourceProvider for MapProvider {
        fn location(&self, name: &str) -> String {
            format!("memory://{name}")
        }

        fn fetch(&self, name: &str) -> Result<Option<String>> {
            Ok(self.0.get(name).map(|s| (*s).to_string()))
        }
    }

    #[test]
    fn collect_core_unions_sources() {
        let provider = MapProvider(HashMap::from([
            ("OpenAI", "# NAME: OpenAI\nDOMAIN-SUFFIX,openai.com\nDOMAIN,chat.openai.com\n"),
            ("Claude", "DOMAIN-SUFFIX,claude.ai\nDOMAIN-SUFFIX,openai.com\n"),
        ]));
        let core = collect_core(&provider, &["OpenAI".into(), "Claude".into()]).unwrap();
        assert_eq!(core.len(), 3);
    }

    #[test]
    fn collect_core_missing_source_is_fatal() {
        let provider = MapProvider(HashMap::from([("OpenAI", "DOMAIN,a.com\n")]));
        let err = collect_core(&provider, &["OpenAI".into(), "Gemini".into()]).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("Gemini"));
        assert!(err.to_string().contains("memory://Gemini"));
    }

    #[test]
    fn unverified_extras_are_reported_not_merged() {
        let core = set(&["DOMAIN-SUFFIX,openai.com"]);
        let upstream = set(&["DOMAIN-SUFFIX,openai.com", "DOMAIN-SUFFIX,poe.com"]);
        let extras = list(&["DOMAIN-SUFFIX,poe.com", "DOMAIN,made-up.example"]);

        let out = merge_corpus(&core, &extras, &RuleSet::new(), &upstream);

        assert!(out.merged.contains(&RuleRecord::parse("DOMAIN-SUFFIX,poe.com")));
        assert!(!out.merged.contains(&RuleRecord::parse("DOMAIN,made-up.example")));
        assert_eq!(texts(&out.missing), vec!["DOMAIN,made-up.example"]);
        assert_eq!(out.verified_extra.len(), 1);
    }

    #[test]
    fn custom_is_trusted_unconditionally() {
        let out = merge_corpus(
            &RuleSet::new(),
            &[],
            &set(&["DOMAIN,internal.example"]),
            &RuleSet::new(),
        );
        assert_eq!(texts(&out.merged_list()), vec!["DOMAIN,internal.example"]);
        assert!(out.missing.is_empty());
    }

    #[test]
    fn modifier_variants_stay_distinct() {
        let core = set(&["DOMAIN-SUFFIX,x.com,no-resolve"]);
        let custom = set(&["DOMAIN-SUFFIX,x.com"]);
        let out = merge_corpus(&core, &[], &custom, &RuleSet::new());
        assert_eq!(
            texts(&out.merged_list()),
            vec!["DOMAIN-SUFFIX,x.com", "DOMAIN-SUFFIX,x.com,no-resolve"]
        );
    }

    #[test]
    fn resolve_view_collapses_variants() {
        let merged = set(&[
            "DOMAIN-SUFFIX,x.com,no-resolve",
            "DOMAIN-SUFFIX,x.com",
            "IP-CIDR,1.0.0.0/24,no-resolve",
            "DOMAIN,y.com",
        ]);
        let view = resolve_view(&merged);
        assert_eq!(
            texts(&view),
            vec!["DOMAIN,y.com", "DOMAIN-SUFFIX,x.com", "IP-CIDR,1.0.0.0/24"]
        );
        assert!(view.len() <= merged.len());
    }

    #[test]
    fn merge_is_idempotent() {
        let core = set(&["DOMAIN-SUFFIX,openai.com", "IP-ASN,13335"]);
        let upstream = set(&["DOMAIN,extra.example", "DOMAIN-SUFFIX,openai.com"]);
        let extras = list(&["DOMAIN,extra.example", "DOMAIN,gone.example"]);
        let custom = set(&["USER-AGENT,ChatGPT*"]);
        let first = merge_corpus(&core, &extras, &custom, &upstream);

        let second = merge_corpus(&RuleSet::new(), &[], &first.merged, &RuleSet::new());
        assert_eq!(first.merged, second.merged);
        assert_eq!(first.merged_list(), second.merged_list());
    }

    #[test]
    fn refreshed_custom_is_exact_difference() {
        let core = set(&["DOMAIN-SUFFIX,openai.com"]);
        let upstream = set(&["DOMAIN,extra.example"]);
        let extras = list(&["DOMAIN,extra.example"]);
        let custom = set(&[
            "DOMAIN-SUFFIX,openai.com",
            "DOMAIN,extra.example",
            "DOMAIN-SUFFIX,mine.example",
            "DOMAIN,mine.example",
        ]);
        let out = merge_corpus(&core, &extras, &custom, &upstream);
        assert_eq!(
            texts(&out.refreshed_custom(&core)),
            vec!["DOMAIN,mine.example", "DOMAIN-SUFFIX,mine.example"]
        );
    }
}
