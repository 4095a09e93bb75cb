//! Where every input and output lives on disk.

use routelist_core::{parse_rules, CorpusError, Dialect, RuleSet, SourceProvider};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::PathsConfig;
use crate::files;

/// Candidate extra rules, one per line.
pub const EXTRA_RULES_FILE: &str = "upstream_extra_rules.txt";
/// Persisted liveness state.
pub const STATE_FILE: &str = "nxdomain_state.json";
/// Markdown liveness report.
pub const REPORT_FILE: &str = "nxdomain_report.md";
/// Removal candidates, one per line.
pub const CANDIDATES_FILE: &str = "nxdomain_candidates.txt";
/// Extra rules not found upstream.
pub const MISSING_FILE: &str = "upstream_missing.txt";

/// Paths inside the repository that routelist maintains.
#[derive(Debug, Clone)]
pub struct Layout {
    rules_dir: PathBuf,
    data_dir: PathBuf,
    reports_dir: PathBuf,
}

impl Layout {
    /// Resolve configured directories against the repository root.
    pub fn new(root: &Path, paths: &PathsConfig) -> Self {
        Self {
            rules_dir: root.join(&paths.rules_dir),
            data_dir: root.join(&paths.data_dir),
            reports_dir: root.join(&paths.reports_dir),
        }
    }

    /// `<rules>/<Dialect>/<list>/<list>.list`
    pub fn list_path(&self, dialect: Dialect, list: &str) -> PathBuf {
        self.rules_dir
            .join(dialect.name())
            .join(list)
            .join(format!("{list}.list"))
    }

    /// Manually maintained list, kept next to the canonical one.
    pub fn custom_path(&self, list: &str, custom: &str) -> PathBuf {
        self.canonical_sibling(list, custom)
    }

    /// Resolve variant, kept next to the canonical one.
    pub fn resolve_path(&self, list: &str, resolve: &str) -> PathBuf {
        self.canonical_sibling(list, resolve)
    }

    fn canonical_sibling(&self, list: &str, stem: &str) -> PathBuf {
        self.rules_dir
            .join(Dialect::Surge.name())
            .join(list)
            .join(format!("{stem}.list"))
    }

    pub fn extra_rules_path(&self) -> PathBuf {
        self.data_dir.join(EXTRA_RULES_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.reports_dir.join(REPORT_FILE)
    }

    pub fn candidates_path(&self) -> PathBuf {
        self.reports_dir.join(CANDIDATES_FILE)
    }

    pub fn missing_path(&self) -> PathBuf {
        self.reports_dir.join(MISSING_FILE)
    }
}

/// A checkout of the upstream rule repository.
///
/// Named lists live at `rule/Surge/<Name>/<Name>.list`.
#[derive(Debug, Clone)]
pub struct UpstreamTree {
    surge_dir: PathBuf,
}

impl UpstreamTree {
    pub fn new(root: &Path) -> Self {
        Self {
            surge_dir: root.join("rule").join(Dialect::Surge.name()),
        }
    }

    fn list_path(&self, name: &str) -> PathBuf {
        self.surge_dir.join(name).join(format!("{name}.list"))
    }

    /// Every rule in every `.list` file of the checkout.
    ///
    /// A checkout without a Surge directory has an empty universe.
    pub fn universe(&self) -> routelist_core::Result<RuleSet> {
        let mut universe = RuleSet::new();
        if !self.surge_dir.is_dir() {
            tracing::warn!(path = %self.surge_dir.display(), "upstream has no Surge rules");
            return Ok(universe);
        }

        let mut files = 0usize;
        for entry in WalkDir::new(&self.surge_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "list"))
        {
            if let Some(text) = files::read_optional(entry.path())? {
                universe.extend(parse_rules(&text));
                files += 1;
            }
        }
        tracing::debug!(files, rules = universe.len(), "indexed upstream rules");
        Ok(universe)
    }
}

impl SourceProvider for UpstreamTree {
    fn location(&self, name: &str) -> String {
        self.list_path(name).display().to_string()
    }

    fn fetch(&self, name: &str) -> routelist_core::Result<Option<String>> {
        files::read_optional(&self.list_path(name)).map_err(CorpusError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routelist_core::{collect_core, RuleRecord};

    fn write(root: &Path, rel: &str, content: &str) {
        files::write_text(&root.join(rel), content).unwrap();
    }

    #[test]
    fn layout_paths() {
        let layout = Layout::new(Path::new("/repo"), &PathsConfig::default());
        assert_eq!(
            layout.list_path(Dialect::QuantumultX, "AI"),
            PathBuf::from("/repo/rule/QuantumultX/AI/AI.list")
        );
        assert_eq!(
            layout.custom_path("AI", "AI_Custom"),
            PathBuf::from("/repo/rule/Surge/AI/AI_Custom.list")
        );
        assert_eq!(layout.state_path(), PathBuf::from("/repo/data/nxdomain_state.json"));
        assert_eq!(layout.missing_path(), PathBuf::from("/repo/reports/upstream_missing.txt"));
    }

    #[test]
    fn universe_spans_every_list() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "rule/Surge/OpenAI/OpenAI.list", "# c\nDOMAIN,openai.com\n");
        write(dir.path(), "rule/Surge/Misc/Deep/Deep.list", "DOMAIN,deep.example\n");
        write(dir.path(), "rule/Surge/Misc/readme.txt", "DOMAIN,ignored.example\n");

        let universe = UpstreamTree::new(dir.path()).universe().unwrap();
        assert_eq!(universe.len(), 2);
        assert!(universe.contains(&RuleRecord::from("DOMAIN,deep.example")));
    }

    #[test]
    fn fetch_reports_missing_lists() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "rule/Surge/OpenAI/OpenAI.list", "DOMAIN,openai.com\n");
        let tree = UpstreamTree::new(dir.path());

        assert!(tree.fetch("Gemini").unwrap().is_none());
        let err = collect_core(&tree, &["OpenAI".into(), "Gemini".into()]).unwrap_err();
        assert!(err.to_string().contains("Gemini"));
    }
}
