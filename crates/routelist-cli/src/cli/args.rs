//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Proxy rule list compiler and domain liveness monitor
///
/// Merges upstream rule lists into one canonical list, projects it into
/// every client dialect and tracks which of its domains stopped resolving.
#[derive(Parser, Debug)]
#[command(name = "routelist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository root holding rule/, data/ and reports/
    #[arg(long, env = "ROUTELIST_ROOT", global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (default: <root>/routelist.toml)
    #[arg(short, long, env = "ROUTELIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge upstream, extra and custom rules into the canonical list
    Sync(SyncArgs),

    /// Write the canonical list in every client dialect
    Build,

    /// Check every domain rule against DNS and update staleness state
    Check,
}

// ============================================================================
// Sync command
// ============================================================================

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Checkout of the upstream rule repository
    #[arg(short, long, env = "ROUTELIST_UPSTREAM")]
    pub upstream: PathBuf,

    /// Rewrite the custom list to hold only rules not already in core sources
    #[arg(long)]
    pub refresh_custom: bool,
}
