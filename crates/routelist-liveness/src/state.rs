//! Staleness state machine and its persisted form.
//!
//! Per domain, a consecutive-NXDOMAIN counter:
//!
//! ```text
//! OK        -> count = 0
//! NXDOMAIN  -> count = count + 1
//! UNKNOWN   -> count unchanged
//! ```
//!
//! `last_status` and `last_checked` are overwritten on every run. A domain
//! whose updated count reaches the threshold is a removal candidate. Records
//! of domains that are no longer checked are kept as they are.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LivenessError, Result};
use crate::status::DomainStatus;

/// Persisted liveness of one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessRecord {
    /// Consecutive NXDOMAIN runs
    #[serde(default)]
    pub count: u32,
    /// Status from the most recent run
    #[serde(default)]
    pub last_status: DomainStatus,
    /// When the most recent run classified the domain
    #[serde(default)]
    pub last_checked: DateTime<Utc>,
}

impl LivenessRecord {
    /// Returns true if the record has reached the removal threshold.
    pub const fn is_candidate(&self, threshold: u32) -> bool {
        self.count >= threshold
    }
}

/// Advance one domain's record by one run.
///
/// `prior` is `None` the first time a domain is seen.
pub fn advance_state(
    prior: Option<&LivenessRecord>,
    status: DomainStatus,
    now: DateTime<Utc>,
) -> LivenessRecord {
    let prior_count = prior.map_or(0, |r| r.count);
    let count = match status {
        DomainStatus::Ok => 0,
        DomainStatus::Nxdomain => prior_count.saturating_add(1),
        DomainStatus::Unknown => prior_count,
    };
    LivenessRecord {
        count,
        last_status: status,
        last_checked: now,
    }
}

/// Every domain's record, keyed and serialised in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LivenessState {
    /// Records by domain
    pub records: BTreeMap<String, LivenessRecord>,
}

impl LivenessState {
    /// Decode persisted state. Empty or whitespace-only text is an empty state.
    ///
    /// Malformed text is an error rather than a silent reset, since a reset
    /// would discard every counter.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
            .map_err(|e| LivenessError::State(format!("failed to parse state: {e}")))
    }

    /// Encode as pretty JSON with sorted keys and a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Record for one domain.
    pub fn get(&self, domain: &str) -> Option<&LivenessRecord> {
        self.records.get(domain)
    }

    /// Number of tracked domains.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no domain is tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Totals and listings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// When the run was evaluated
    pub generated_at: DateTime<Utc>,
    /// Domains classified in this run
    pub checked: usize,
    /// Domains classified OK
    pub ok: usize,
    /// Domains classified NXDOMAIN
    pub nxdomain: usize,
    /// Domains classified UNKNOWN
    pub unknown: usize,
    /// Consecutive NXDOMAIN runs needed to become a candidate
    pub threshold: u32,
    /// Removal candidates, sorted
    pub candidates: Vec<String>,
    /// Domains with an inconclusive result this run, sorted
    pub unknowns: Vec<String>,
}

/// New state plus the run's summary.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// State to persist
    pub state: LivenessState,
    /// What happened in this run
    pub summary: RunSummary,
}

/// Apply one run's results to the prior state.
///
/// Only domains present in `results` are touched. Listings come out sorted
/// regardless of the order checks completed in.
pub fn advance_run(
    prior: &LivenessState,
    results: &BTreeMap<String, DomainStatus>,
    threshold: u32,
    now: DateTime<Utc>,
) -> RunOutcome {
    let mut state = prior.clone();
    let mut summary = RunSummary {
        generated_at: now,
        checked: results.len(),
        ok: 0,
        nxdomain: 0,
        unknown: 0,
        threshold,
        candidates: Vec::new(),
        unknowns: Vec::new(),
    };

    for (domain, status) in results {
        let record = advance_state(prior.get(domain), *status, now);

        match status {
            DomainStatus::Ok => summary.ok += 1,
            DomainStatus::Nxdomain => summary.nxdomain += 1,
            DomainStatus::Unknown => {
                summary.unknown += 1;
                summary.unknowns.push(domain.clone());
            }
        }
        if record.is_candidate(threshold) {
            summary.candidates.push(domain.clone());
        }

        state.records.insert(domain.clone(), record);
    }

    RunOutcome { state, summary }
}
