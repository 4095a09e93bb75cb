//! Domains worth checking in DNS.

use std::collections::BTreeSet;

use routelist_core::RuleRecord;

/// Distinct, sorted values of `DOMAIN` and `DOMAIN-SUFFIX` rules.
///
/// Keyword, wildcard and regex rules do not name a resolvable host and are skipped.
pub fn extract_domains(rules: &[RuleRecord]) -> Vec<String> {
    rules
        .iter()
        .filter(|r| r.rule_type().is_resolvable_domain() && !r.value().is_empty())
        .map(|r| r.value().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
