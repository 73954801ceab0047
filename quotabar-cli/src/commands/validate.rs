//! Validate command - pre-flight config check for one plugin.

use anyhow::{anyhow, bail, Result};
use quotabar_core::PluginConfig;
use quotabar_plugins::PluginRegistry;

use crate::config::ConfigFile;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the validate command.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Plugin id to validate.
    #[arg(long, short)]
    pub plugin: String,
}

/// Runs the validate command.
pub fn run(args: &ValidateArgs, cli: &Cli) -> Result<()> {
    let plugin = PluginRegistry::get(&args.plugin)
        .ok_or_else(|| anyhow!("unknown plugin: {}", args.plugin))?;

    let file = ConfigFile::load(cli.config.as_deref())?;
    let config = file.get(&args.plugin)?.unwrap_or_else(PluginConfig::new);

    let check = plugin.validate_config(&config);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&check)?);
        }
        OutputFormat::Text => {
            if check.valid {
                println!("{}: configuration OK", args.plugin);
            } else {
                println!(
                    "{}: {}",
                    args.plugin,
                    check.message.as_deref().unwrap_or("invalid configuration")
                );
            }
        }
    }

    if !check.valid {
        bail!("configuration invalid for {}", args.plugin);
    }
    Ok(())
}
