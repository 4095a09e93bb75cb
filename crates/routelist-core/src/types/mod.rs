//! Rule model types.

mod counts;
mod rule;

pub use counts::{TypeCounts, Vocabulary};
pub use rule::{parse_rule_file, parse_rules, RuleFile, RuleRecord, RuleType, NO_RESOLVE};
