//! Corpus configuration.

use serde::{Deserialize, Serialize};

/// What the compiled list is called and which sources feed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// List name, used for file names and the `# NAME:` line.
    #[serde(default = "default_name")]
    pub name: String,

    /// Policy group appended to Quantumult rules (default: the list name).
    #[serde(default)]
    pub group: Option<String>,

    /// Upstream lists that must all exist.
    #[serde(default = "default_core_sources")]
    pub core_sources: Vec<String>,

    /// `# AUTHOR:` header value.
    #[serde(default = "default_author")]
    pub author: String,

    /// `# REPO:` header value.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// `# SOURCE:` header value.
    #[serde(default = "default_source")]
    pub source: String,

    /// Additional metadata lines appended to the header.
    #[serde(default)]
    pub extra_meta: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            group: None,
            core_sources: default_core_sources(),
            author: default_author(),
            repository: default_repository(),
            source: default_source(),
            extra_meta: Vec::new(),
        }
    }
}

impl CorpusConfig {
    /// Policy group label for the remap dialects.
    pub fn group(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.name)
    }

    /// Name of the resolve variant of the list.
    pub fn resolve_name(&self) -> String {
        format!("{}_Resolve", self.name)
    }

    /// Name of the manually maintained list.
    pub fn custom_name(&self) -> String {
        format!("{}_Custom", self.name)
    }

    /// Reject configurations that cannot produce a list.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::CorpusError::Config("list name is empty".into()));
        }
        if self.name.contains(['/', '\\', ',']) {
            return Err(crate::CorpusError::Config(format!(
                "list name {:?} contains a path separator or comma",
                self.name
            )));
        }
        if self.group().contains(',') {
            return Err(crate::CorpusError::Config(format!(
                "policy group {:?} contains a comma",
                self.group()
            )));
        }
        if self.core_sources.is_empty() {
            return Err(crate::CorpusError::Config("no core sources configured".into()));
        }
        Ok(())
    }
}

// Default value functions for serde.
fn default_name() -> String {
    String::from("OverseasAI")
}

fn default_core_sources() -> Vec<String> {
    [
        "OpenAI", "Claude", "Anthropic", "Gemini", "BardAI", "Copilot", "Civitai", "Stripe",
        "PayPal",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_author() -> String {
    String::from("aggregated by request")
}

fn default_repository() -> String {
    String::from("git@github.com:viewer12/OverseasAI.list.git")
}

fn default_source() -> String {
    String::from("https://github.com/blackmatrix7/ios_rule_script (rule/Surge)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CorpusConfig::default();
        assert_eq!(config.name, "OverseasAI");
        assert_eq!(config.group(), "OverseasAI");
        assert_eq!(config.core_sources.len(), 9);
        assert_eq!(config.resolve_name(), "OverseasAI_Resolve");
        assert_eq!(config.custom_name(), "OverseasAI_Custom");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CorpusConfig =
            serde_json::from_str(r#"{"name": "AIList", "group": "Proxy"}"#).unwrap();
        assert_eq!(config.group(), "Proxy");
        assert_eq!(config.core_sources[0], "OpenAI");
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let config = CorpusConfig {
            name: "a/b".into(),
            ..CorpusConfig::default()
        };
        assert!(config.validate().unwrap_err().is_config_error());

        let config = CorpusConfig {
            core_sources: Vec::new(),
            ..CorpusConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
