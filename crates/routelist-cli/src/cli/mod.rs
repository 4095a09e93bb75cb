//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Config::default_path(&cli.root));
    let config = Config::load(&config_path)?;

    // Determine output format
    let output_format = cli.output.or(config.output_format).unwrap_or_default();

    // Create context for commands
    let ctx = commands::Context {
        root: cli.root,
        config,
        output_format,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Sync(args) => commands::sync::execute(&ctx, &args),
        Commands::Build => commands::build::execute(&ctx),
        Commands::Check => commands::check::execute(&ctx).await,
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
