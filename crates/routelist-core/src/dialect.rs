//! Projection of the canonical corpus into client dialects.
//!
//! Surge, Clash, Loon and Shadowrocket share the canonical vocabulary and get
//! the rules verbatim. Quantumult and QuantumultX name hostname rules `HOST*`,
//! have no `no-resolve`, and need a policy group on every line.

use crate::types::{RuleRecord, RuleType, TypeCounts, Vocabulary};

/// Target client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Surge; the canonical form
    Surge,
    /// Clash
    Clash,
    /// Loon
    Loon,
    /// Shadowrocket
    Shadowrocket,
    /// Quantumult X
    QuantumultX,
    /// Quantumult
    Quantumult,
}

/// How a dialect rewrites rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectFamily {
    /// Rules are emitted unchanged
    PassThrough,
    /// Hostname types become `HOST*`, modifiers are dropped, a policy group is appended
    Remap,
}

impl Dialect {
    /// Every supported dialect, canonical first.
    pub const ALL: [Self; 6] = [
        Self::Surge,
        Self::Clash,
        Self::Loon,
        Self::Shadowrocket,
        Self::QuantumultX,
        Self::Quantumult,
    ];

    /// Name used for the dialect's output directory.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surge => "Surge",
            Self::Clash => "Clash",
            Self::Loon => "Loon",
            Self::Shadowrocket => "Shadowrocket",
            Self::QuantumultX => "QuantumultX",
            Self::Quantumult => "Quantumult",
        }
    }

    /// Rewrite family of the dialect.
    pub const fn family(self) -> DialectFamily {
        match self {
            Self::Surge | Self::Clash | Self::Loon | Self::Shadowrocket => {
                DialectFamily::PassThrough
            }
            Self::QuantumultX | Self::Quantumult => DialectFamily::Remap,
        }
    }

    /// Vocabulary of the emitted type names.
    pub const fn vocabulary(self) -> Vocabulary {
        match self.family() {
            DialectFamily::PassThrough => Vocabulary::Domain,
            DialectFamily::Remap => Vocabulary::Host,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output lines of one dialect with counts over the emitted type names.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Rule lines in input order
    pub lines: Vec<String>,
    /// Per-type counts of `lines`
    pub counts: TypeCounts,
}

/// `HOST*` name for a rule type in the remap family.
fn remap_type(rule_type: &RuleType) -> &str {
    match rule_type {
        RuleType::Domain => "HOST",
        RuleType::DomainSuffix => "HOST-SUFFIX",
        RuleType::DomainKeyword => "HOST-KEYWORD",
        RuleType::DomainWildcard => "HOST-WILDCARD",
        RuleType::DomainRegex => "HOST-REGEX",
        RuleType::IpCidr
        | RuleType::IpCidr6
        | RuleType::IpAsn
        | RuleType::UserAgent
        | RuleType::Unknown(_) => rule_type.as_str(),
    }
}

/// Project canonically ordered rules into a dialect.
///
/// `group` is the policy group appended to every line of the remap family and
/// ignored otherwise. Line order follows `rules`.
pub fn transform(dialect: Dialect, rules: &[RuleRecord], group: &str) -> Projection {
    let vocabulary = dialect.vocabulary();
    let mut counts = TypeCounts::new(vocabulary);
    let mut lines = Vec::with_capacity(rules.len());

    match dialect.family() {
        DialectFamily::PassThrough => {
            for rule in rules {
                counts.add(rule.type_str());
                lines.push(rule.as_str().to_string());
            }
        }
        DialectFamily::Remap => {
            for rule in rules {
                let host_type = remap_type(rule.rule_type());
                counts.add(host_type);
                lines.push(format!("{host_type},{},{group}", rule.value()));
            }
        }
    }

    Projection { lines, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::canonicalize;

    fn rules(lines: &[&str]) -> Vec<RuleRecord> {
        canonicalize(lines.iter().map(|l| RuleRecord::parse(l)))
    }

    #[test]
    fn pass_through_reproduces_lines() {
        let list = rules(&[
            "DOMAIN,chat.openai.com",
            "DOMAIN-SUFFIX,x.com,no-resolve",
            "IP-CIDR,1.2.3.0/24,no-resolve",
            "PROCESS-NAME,claude",
        ]);
        for dialect in [Dialect::Surge, Dialect::Clash, Dialect::Loon, Dialect::Shadowrocket] {
            let p = transform(dialect, &list, "Group");
            let expected: Vec<String> = list.iter().map(ToString::to_string).collect();
            assert_eq!(p.lines, expected);
            assert_eq!(p.counts.get("DOMAIN-SUFFIX"), 1);
            assert_eq!(p.counts.total(), list.len());
        }
    }

    #[test]
    fn remap_drops_no_resolve_and_appends_group() {
        let p = transform(
            Dialect::QuantumultX,
            &rules(&["DOMAIN-SUFFIX,x.com,no-resolve"]),
            "OverseasAI",
        );
        assert_eq!(p.lines, vec!["HOST-SUFFIX,x.com,OverseasAI"]);
    }

    #[test]
    fn remap_counts_use_host_names() {
        let list = rules(&[
            "DOMAIN,a.com",
            "DOMAIN-KEYWORD,openai",
            "DOMAIN-REGEX,^b\\.com$",
            "DOMAIN-WILDCARD,*.c.com",
            "IP-CIDR6,2606:4700::/32,no-resolve",
            "USER-AGENT,Claude*",
            "FINAL",
        ]);
        let p = transform(Dialect::Quantumult, &list, "G");
        assert_eq!(
            p.lines,
            vec![
                "HOST,a.com,G",
                "HOST-KEYWORD,openai,G",
                "HOST-WILDCARD,*.c.com,G",
                "HOST-REGEX,^b\\.com$,G",
                "IP-CIDR6,2606:4700::/32,G",
                "USER-AGENT,Claude*,G",
                "FINAL,,G",
            ]
        );
        assert_eq!(p.counts.vocabulary(), Vocabulary::Host);
        assert_eq!(p.counts.get("HOST"), 1);
        assert_eq!(p.counts.get("DOMAIN"), 0);
        assert_eq!(p.counts.get("FINAL"), 1);
    }

    #[test]
    fn families() {
        assert_eq!(Dialect::Loon.family(), DialectFamily::PassThrough);
        assert_eq!(Dialect::QuantumultX.family(), DialectFamily::Remap);
        assert_eq!(Dialect::ALL.len(), 6);
    }
}
