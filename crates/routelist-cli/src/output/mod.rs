//! Output formatting for command summaries.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    /// Print a machine-readable summary.
    ///
    /// Returns `false` for [`OutputFormat::Pretty`], leaving the caller to
    /// render it.
    pub fn print_structured<T: Serialize>(self, value: &T) -> Result<bool> {
        match self {
            Self::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Self::Yaml => print!("{}", serde_yaml::to_string(value)?),
            Self::Pretty => return Ok(false),
        }
        Ok(true)
    }
}
