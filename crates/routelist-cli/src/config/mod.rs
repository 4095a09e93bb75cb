//! Configuration management.
//!
//! Everything lives in one TOML file, by default `routelist.toml` at the
//! repository root. A missing file means all defaults.
//!
//! ```toml
//! [corpus]
//! name = "OverseasAI"
//! core_sources = ["OpenAI", "Claude"]
//!
//! [liveness]
//! resolvers = ["1.1.1.1", "8.8.8.8"]
//! threshold = 3
//!
//! [paths]
//! reports_dir = "reports"
//! ```

use anyhow::{Context as _, Result};
use routelist_core::CorpusConfig;
use routelist_liveness::LivenessConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// File name looked up at the repository root.
pub const CONFIG_FILE: &str = "routelist.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// What the list is called and where it comes from.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// DNS liveness settings.
    #[serde(default)]
    pub liveness: LivenessConfig,

    /// Repository layout.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Default output format.
    #[serde(default)]
    pub output_format: Option<OutputFormat>,
}

/// Directories, relative to the repository root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Generated lists, one subdirectory per dialect.
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,

    /// Extra-rule candidates and liveness state.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Human-readable reports.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            rules_dir: default_rules_dir(),
            data_dir: default_data_dir(),
            reports_dir: default_reports_dir(),
        }
    }
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("rule")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Config {
    /// Default config file location under a repository root.
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Load configuration from file, falling back to defaults if it is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.corpus.name, "OverseasAI");
        assert_eq!(config.liveness.threshold, 3);
        assert_eq!(config.paths.reports_dir, PathBuf::from("reports"));
        assert!(config.output_format.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
output_format = "json"

[corpus]
name = "AI"
core_sources = ["OpenAI"]

[liveness]
threshold = 5
resolvers = ["9.9.9.9"]
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.corpus.name, "AI");
        assert_eq!(config.corpus.core_sources, vec!["OpenAI"]);
        assert_eq!(config.corpus.group(), "AI");
        assert_eq!(config.liveness.threshold, 5);
        assert_eq!(config.liveness.concurrency, 20);
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[corpus\nname = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
