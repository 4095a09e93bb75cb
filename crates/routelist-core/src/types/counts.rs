use std::collections::BTreeMap;

/// Type vocabulary of an emitted artifact, fixing the order of its count lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// `DOMAIN*` names, used by the canonical form and pass-through dialects
    Domain,
    /// `HOST*` names, used by the Quantumult family
    Host,
}

impl Vocabulary {
    /// Type names in the order their counts are listed.
    pub const fn order(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                "DOMAIN",
                "DOMAIN-SUFFIX",
                "DOMAIN-KEYWORD",
                "DOMAIN-WILDCARD",
                "DOMAIN-REGEX",
                "IP-CIDR",
                "IP-CIDR6",
                "IP-ASN",
                "USER-AGENT",
            ],
            Self::Host => &[
                "HOST",
                "HOST-SUFFIX",
                "HOST-KEYWORD",
                "HOST-WILDCARD",
                "HOST-REGEX",
                "IP-CIDR",
                "IP-CIDR6",
                "IP-ASN",
                "USER-AGENT",
            ],
        }
    }
}

/// Number of emitted rules per type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCounts {
    vocabulary: Vocabulary,
    counts: BTreeMap<String, usize>,
}

impl TypeCounts {
    /// Empty tally for a vocabulary.
    pub const fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            counts: BTreeMap::new(),
        }
    }

    /// Count the type names of already serialised rule lines.
    pub fn tally<'a, I>(vocabulary: Vocabulary, type_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::new(vocabulary);
        for name in type_names {
            counts.add(name);
        }
        counts
    }

    /// Record one rule of the given type.
    pub fn add(&mut self, type_name: &str) {
        *self.counts.entry(type_name.to_string()).or_insert(0) += 1;
    }

    /// Count for one type name.
    pub fn get(&self, type_name: &str) -> usize {
        self.counts.get(type_name).copied().unwrap_or(0)
    }

    /// Sum over every type.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Vocabulary the counts were taken in.
    pub const fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// Non-zero counts, vocabulary types first in fixed order, then any other
    /// type names alphabetically.
    pub fn ordered(&self) -> Vec<(&str, usize)> {
        let order = self.vocabulary.order();
        let mut out: Vec<(&str, usize)> = order
            .iter()
            .map(|name| (*name, self.get(name)))
            .filter(|(_, n)| *n > 0)
            .collect();
        out.extend(
            self.counts
                .iter()
                .filter(|(name, n)| **n > 0 && !order.contains(&name.as_str()))
                .map(|(name, n)| (name.as_str(), *n)),
        );
        out
    }
}
