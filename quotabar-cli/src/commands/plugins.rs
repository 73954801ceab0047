//! Plugins command - list registered plugins.

use anyhow::Result;
use quotabar_plugins::PluginRegistry;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the plugins command.
pub fn run(cli: &Cli) -> Result<()> {
    info!("Listing plugins");

    let plugins = PluginRegistry::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new();

            println!("{}", formatter.format_plugins_header());
            println!("{}", "─".repeat(78));

            for plugin in plugins {
                println!("{}", formatter.format_plugin_line(plugin.metadata()));
            }

            println!();
            println!("Total: {} plugins", plugins.len());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let metadata: Vec<_> = plugins.iter().map(|plugin| plugin.metadata()).collect();
            println!("{}", formatter.format(&metadata)?);
        }
    }

    Ok(())
}
