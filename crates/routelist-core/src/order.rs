//! Canonical ordering of rules.
//!
//! Every emitted artifact is sorted with the same key:
//! `(type rank, type name, remainder)`, where the remainder is everything
//! after the first comma. Unknown types rank after all known ones and sort
//! among themselves by name.

use std::cmp::Ordering;

use crate::types::RuleRecord;

/// Sort key of a rule.
pub fn sort_key(rule: &RuleRecord) -> (u8, &str, &str) {
    (rule.rule_type().rank(), rule.type_str(), rule.remainder())
}

/// Compare two rules in canonical order.
///
/// Rules whose keys tie (`"X"` and `"X,"`) fall back to the full text so the
/// order stays total and agrees with textual identity.
pub fn canonical_cmp(a: &RuleRecord, b: &RuleRecord) -> Ordering {
    sort_key(a)
        .cmp(&sort_key(b))
        .then_with(|| a.as_str().cmp(b.as_str()))
}

/// Deduplicate and sort rules into canonical order.
///
/// The result depends only on the set of distinct rule texts, never on the
/// order they were supplied in.
pub fn canonicalize<I>(rules: I) -> Vec<RuleRecord>
where
    I: IntoIterator<Item = RuleRecord>,
{
    let mut list: Vec<RuleRecord> = rules.into_iter().collect();
    list.sort_by(canonical_cmp);
    list.dedup();
    list
}
