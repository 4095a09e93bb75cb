use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Modifier telling the client not to resolve the hostname before matching.
pub const NO_RESOLVE: &str = "no-resolve";

/// Rule type, as written in the first field of a rule line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Exact hostname match
    Domain,
    /// Hostname or any of its subdomains
    DomainSuffix,
    /// Substring of the hostname
    DomainKeyword,
    /// Glob-style hostname pattern
    DomainWildcard,
    /// Regular expression over the hostname
    DomainRegex,
    /// IPv4 network
    IpCidr,
    /// IPv6 network
    IpCidr6,
    /// Autonomous system number
    IpAsn,
    /// User-Agent header fragment
    UserAgent,
    /// Anything else; kept verbatim and sorted after the known types
    Unknown(String),
}

impl RuleType {
    /// Known types in canonical order.
    pub const KNOWN: [Self; 9] = [
        Self::Domain,
        Self::DomainSuffix,
        Self::DomainKeyword,
        Self::DomainWildcard,
        Self::DomainRegex,
        Self::IpCidr,
        Self::IpCidr6,
        Self::IpAsn,
        Self::UserAgent,
    ];

    /// Rank assigned to every unknown type.
    pub const UNKNOWN_RANK: u8 = 99;

    /// Parse a type field. Never fails: unrecognised names become [`RuleType::Unknown`].
    pub fn parse(name: &str) -> Self {
        match name {
            "DOMAIN" => Self::Domain,
            "DOMAIN-SUFFIX" => Self::DomainSuffix,
            "DOMAIN-KEYWORD" => Self::DomainKeyword,
            "DOMAIN-WILDCARD" => Self::DomainWildcard,
            "DOMAIN-REGEX" => Self::DomainRegex,
            "IP-CIDR" => Self::IpCidr,
            "IP-CIDR6" => Self::IpCidr6,
            "IP-ASN" => Self::IpAsn,
            "USER-AGENT" => Self::UserAgent,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The name as it appears in a rule line.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Domain => "DOMAIN",
            Self::DomainSuffix => "DOMAIN-SUFFIX",
            Self::DomainKeyword => "DOMAIN-KEYWORD",
            Self::DomainWildcard => "DOMAIN-WILDCARD",
            Self::DomainRegex => "DOMAIN-REGEX",
            Self::IpCidr => "IP-CIDR",
            Self::IpCidr6 => "IP-CIDR6",
            Self::IpAsn => "IP-ASN",
            Self::UserAgent => "USER-AGENT",
            Self::Unknown(name) => name,
        }
    }

    /// Position in the canonical order.
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Domain => 0,
            Self::DomainSuffix => 1,
            Self::DomainKeyword => 2,
            Self::DomainWildcard => 3,
            Self::DomainRegex => 4,
            Self::IpCidr => 5,
            Self::IpCidr6 => 6,
            Self::IpAsn => 7,
            Self::UserAgent => 8,
            Self::Unknown(_) => Self::UNKNOWN_RANK,
        }
    }

    /// Returns true for types whose value is a hostname that can be looked up in DNS.
    pub const fn is_resolvable_domain(&self) -> bool {
        matches!(self, Self::Domain | Self::DomainSuffix)
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed rule line: `TYPE,VALUE[,MODIFIER]*`.
///
/// Identity is the exact line text. Two rules that differ only in casing or
/// modifier order are different rules.
#[derive(Debug, Clone)]
pub struct RuleRecord {
    text: String,
    rule_type: RuleType,
    value: String,
    modifiers: Vec<String>,
}

impl RuleRecord {
    /// Parse a single trimmed rule line.
    ///
    /// A line without a value field is accepted with an empty value.
    pub fn parse(line: &str) -> Self {
        let text = line.trim().to_string();
        let mut fields = text.split(',');
        let rule_type = RuleType::parse(fields.next().unwrap_or_default());
        let value = fields.next().unwrap_or_default().to_string();
        let modifiers = fields.map(str::to_string).collect();

        Self {
            text,
            rule_type,
            value,
            modifiers,
        }
    }

    /// Build a rule from parts, serialising them in order.
    pub fn from_parts(rule_type: &RuleType, value: &str, modifiers: &[String]) -> Self {
        let mut text = format!("{rule_type},{value}");
        for m in modifiers {
            text.push(',');
            text.push_str(m);
        }
        Self::parse(&text)
    }

    /// Full line text (the identity of the rule).
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Rule type.
    pub const fn rule_type(&self) -> &RuleType {
        &self.rule_type
    }

    /// Raw type field as written.
    pub fn type_str(&self) -> &str {
        self.text.split_once(',').map_or(self.text.as_str(), |(t, _)| t)
    }

    /// Value field, empty when absent.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Trailing modifiers in their written order.
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Everything after the first comma.
    pub fn remainder(&self) -> &str {
        self.text.split_once(',').map_or("", |(_, rest)| rest)
    }

    /// Returns true if the rule carries the `no-resolve` modifier.
    pub fn has_no_resolve(&self) -> bool {
        self.modifiers.iter().any(|m| m == NO_RESOLVE)
    }

    /// Same rule with every `no-resolve` modifier removed.
    #[must_use]
    pub fn without_no_resolve(&self) -> Self {
        if !self.has_no_resolve() {
            return self.clone();
        }
        let kept: Vec<String> = self
            .modifiers
            .iter()
            .filter(|m| *m != NO_RESOLVE)
            .cloned()
            .collect();
        Self::from_parts(&self.rule_type, &self.value, &kept)
    }
}

impl PartialEq for RuleRecord {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for RuleRecord {}

impl Hash for RuleRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Ord for RuleRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        crate::order::canonical_cmp(self, other)
    }
}

impl PartialOrd for RuleRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for RuleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for RuleRecord {
    fn from(line: &str) -> Self {
        Self::parse(line)
    }
}

/// A rule file split into its `#` header lines and its rules.
#[derive(Debug, Clone, Default)]
pub struct RuleFile {
    /// Comment lines, trimmed, in file order
    pub header: Vec<String>,
    /// Rule lines, in file order
    pub rules: Vec<RuleRecord>,
}

/// Parse rule text into records, skipping blank lines and `#` comments.
pub fn parse_rules(text: &str) -> Vec<RuleRecord> {
    parse_rule_file(text).rules
}

/// Parse rule text, keeping the comment lines as well.
pub fn parse_rule_file(text: &str) -> RuleFile {
    let mut file = RuleFile::default();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            file.header.push(line.to_string());
        } else {
            file.rules.push(RuleRecord::parse(line));
        }
    }
    file
}
