//! Command implementations.

pub mod build;
pub mod check;
pub mod sync;

use std::path::PathBuf;

use crate::config::Config;
use crate::layout::Layout;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Repository root
    pub root: PathBuf,

    /// Loaded configuration
    pub config: Config,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Paths under the repository root.
    pub fn layout(&self) -> Layout {
        Layout::new(&self.root, &self.config.paths)
    }

    /// Name of the compiled list.
    pub fn list_name(&self) -> &str {
        &self.config.corpus.name
    }
}
