//! DNS liveness monitoring for routelist domains.
//!
//! Every hostname rule is checked against several independent resolvers.
//! Domains that keep answering NXDOMAIN run after run become removal
//! candidates; inconclusive results never count against a domain.
//!
//! ## Data Flow
//!
//! ```text
//! rules -> extract_domains()
//!       -> LivenessChecker::check_all()      bounded concurrency, per-query timeout
//!       -> advance_run(prior state, results) pure, no I/O
//!       -> LivenessState::to_json() + render_report() + render_candidates()
//! ```

pub mod checker;
pub mod config;
pub mod domains;
pub mod error;
pub mod probe;
pub mod report;
pub mod state;
pub mod status;

pub use checker::LivenessChecker;
pub use config::LivenessConfig;
pub use domains::extract_domains;
pub use error::{LivenessError, Result};
pub use probe::{DnsProbe, HickoryProbe};
pub use report::{render_candidates, render_report};
pub use state::{advance_run, advance_state, LivenessRecord, LivenessState, RunOutcome, RunSummary};
pub use status::{classify, DomainStatus, QueryOutcome, RecordKind};
