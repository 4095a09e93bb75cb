//! Query outcomes and their aggregation into a per-domain status.

use serde::{Deserialize, Serialize};

/// Record kind queried for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
}

impl RecordKind {
    /// Kinds queried for every domain.
    pub const ALL: [Self; 2] = [Self::A, Self::Aaaa];
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
        }
    }
}

/// Outcome of one query against one resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Records of the requested kind came back
    Answered,
    /// The name exists but has no records of this kind
    NoData,
    /// The resolver says the name does not exist
    NxDomain,
    /// Timeout, unreachable nameserver or any other transport fault
    Failed,
}

impl QueryOutcome {
    /// Returns true if the outcome proves the name exists.
    pub const fn proves_existence(self) -> bool {
        matches!(self, Self::Answered | Self::NoData)
    }
}

/// Liveness of a domain for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainStatus {
    /// At least one resolver showed the name exists
    #[serde(rename = "OK")]
    Ok,
    /// Every resolver said the name does not exist
    #[serde(rename = "NXDOMAIN")]
    Nxdomain,
    /// No proof either way
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl DomainStatus {
    /// Label used in state files and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Nxdomain => "NXDOMAIN",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fold every resolver/kind outcome for a domain into one status.
///
/// Any proof of existence wins, then any failure makes the result
/// inconclusive, and only a unanimous NXDOMAIN is reported as such. No
/// outcomes at all is inconclusive.
pub fn classify<I>(outcomes: I) -> DomainStatus
where
    I: IntoIterator<Item = QueryOutcome>,
{
    let mut seen_any = false;
    let mut failed = false;
    for outcome in outcomes {
        seen_any = true;
        if outcome.proves_existence() {
            return DomainStatus::Ok;
        }
        failed |= outcome == QueryOutcome::Failed;
    }
    if failed || !seen_any {
        DomainStatus::Unknown
    } else {
        DomainStatus::Nxdomain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use QueryOutcome::{Answered, Failed, NoData, NxDomain};

    #[test]
    fn existence_beats_everything() {
        assert_eq!(classify([NxDomain, Failed, Answered, NxDomain]), DomainStatus::Ok);
        assert_eq!(classify([Failed, NoData]), DomainStatus::Ok);
    }

    #[test]
    fn no_data_counts_as_existing() {
        assert_eq!(classify([NoData, NoData, NxDomain, NxDomain]), DomainStatus::Ok);
    }

    #[test]
    fn failure_is_inconclusive() {
        assert_eq!(classify([NxDomain, NxDomain, NxDomain, Failed]), DomainStatus::Unknown);
        assert_eq!(classify([Failed, Failed]), DomainStatus::Unknown);
    }

    #[test]
    fn unanimous_nxdomain() {
        assert_eq!(classify([NxDomain; 4]), DomainStatus::Nxdomain);
    }

    #[test]
    fn empty_is_unknown() {
        assert_eq!(classify(Vec::<QueryOutcome>::new()), DomainStatus::Unknown);
    }

    #[test]
    fn status_serializes_as_labels() {
        assert_eq!(serde_json::to_string(&DomainStatus::Nxdomain).unwrap(), "\"NXDOMAIN\"");
        let parsed: DomainStatus = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(parsed, DomainStatus::Ok);
    }
}
