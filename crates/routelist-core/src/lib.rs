//! Rule model and compile pipeline for routelist.
//!
//! This crate holds the pure half of the system:
//!
//! - **Types**: [`RuleRecord`] parsing with textual identity, per-type counts
//! - **Ordering**: the canonical sort applied before anything is written
//! - **Merging**: core, upstream-extra and custom buckets into one corpus
//! - **Dialects**: re-projection into Surge, Clash, Loon, Shadowrocket and
//!   Quantumult(X) rule syntax
//! - **Headers**: the `#` metadata block with regenerated counts
//!
//! # Example
//!
//! ```rust
//! use routelist_core::{canonicalize, parse_rules, Artifact, Dialect};
//!
//! let rules = canonicalize(parse_rules("DOMAIN-SUFFIX,openai.com\nDOMAIN,chat.openai.com\n"));
//! let qx = Artifact::for_dialect(Dialect::QuantumultX, "AI", &[], &rules, "AI");
//! assert_eq!(qx.body[0], "HOST,chat.openai.com,AI");
//! ```

pub mod artifact;
pub mod config;
pub mod dialect;
mod error;
pub mod header;
pub mod merge;
pub mod order;
pub mod types;

pub use artifact::Artifact;
pub use config::CorpusConfig;
pub use dialect::{transform, Dialect, DialectFamily, Projection};
pub use error::{CorpusError, Result};
pub use header::build_header;
pub use merge::{collect_core, merge_corpus, MergeOutcome, RuleSet, SourceProvider};
pub use order::canonicalize;
pub use types::*;
