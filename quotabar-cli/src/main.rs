// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Quotabar CLI - balance plugin runner from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Fetch every configured plugin
//! quotabar
//!
//! # Fetch a single plugin
//! quotabar fetch --plugin zhipu-balance
//!
//! # JSON output
//! quotabar fetch --plugin antigravity --format json --pretty
//!
//! # Pre-flight config check
//! quotabar validate --plugin 88code-balance
//!
//! # List plugins
//! quotabar plugins
//! ```

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{fetch, plugins, validate};

// ============================================================================
// CLI Definition
// ============================================================================

/// Quotabar CLI - balance plugin runner.
#[derive(Parser)]
#[command(name = "quotabar")]
#[command(about = "Balance query plugins from the command line")]
#[command(long_about = r#"
Quotabar runs balance query plugins against third-party billing APIs and
prints their normalized reports.

Plugins:
  • 88Code subscription balance (88code-balance)
  • Antigravity model quotas (antigravity)
  • Right.codes subscriptions (right-code)
  • Zhipu AI quota limits (zhipu-balance)

Plugin credentials live in a JSON config file keyed by plugin id
(default: <config dir>/quotabar/config.json):

  {
    "zhipu-balance": { "apiKey": "..." },
    "right-code": { "apiKey": "..." }
  }

Examples:
  quotabar                              # Every configured plugin
  quotabar fetch --plugin zhipu-balance # Single plugin
  quotabar --format json --pretty       # JSON output
  quotabar validate --plugin right-code # Config pre-flight check
"#)]
#[command(version)]
#[command(author = "Quotabar Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'fetch' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Path to the plugin config file (JSON object keyed by plugin id).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch balance data (default if no command specified).
    #[command(visible_alias = "f")]
    Fetch(fetch::FetchArgs),

    /// List registered plugins.
    #[command(visible_alias = "p")]
    Plugins,

    /// Validate a plugin's configuration.
    #[command(visible_alias = "v")]
    Validate(validate::ValidateArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("quotabar=debug,info")
    } else {
        EnvFilter::new("quotabar=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Fetch(args)) => fetch::run(args, &cli).await,
        Some(Commands::Plugins) => plugins::run(&cli),
        Some(Commands::Validate(args)) => validate::run(args, &cli),
        None => {
            // Default to fetch command
            fetch::run(&fetch::FetchArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }

    Ok(())
}
