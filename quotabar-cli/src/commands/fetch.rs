//! Fetch command - run plugins and print normalized reports.

use anyhow::{anyhow, bail, Result};
use futures::future::join_all;
use quotabar_core::PluginConfig;
use quotabar_plugins::{BalancePlugin, PluginContext, PluginRegistry};
use tracing::info;

use crate::config::ConfigFile;
use crate::output::{JsonFormatter, PluginReportOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the fetch command.
#[derive(clap::Args, Default)]
pub struct FetchArgs {
    /// Plugin id to fetch, or "all" for every configured plugin.
    #[arg(long, short)]
    pub plugin: Option<String>,
}

/// Runs the fetch command.
pub async fn run(args: &FetchArgs, cli: &Cli) -> Result<()> {
    let file = ConfigFile::load(cli.config.as_deref())?;

    let targets: Vec<&'static dyn BalancePlugin> = match args.plugin.as_deref() {
        None | Some("all") => {
            let configured: Vec<_> = PluginRegistry::all()
                .iter()
                .filter(|plugin| file.has(&plugin.metadata().id))
                .map(Box::as_ref)
                .collect();
            if configured.is_empty() {
                bail!("no plugins configured; add entries to the config file");
            }
            configured
        }
        Some(id) => {
            vec![PluginRegistry::get(id).ok_or_else(|| anyhow!("unknown plugin: {id}"))?]
        }
    };

    info!(count = targets.len(), "Fetching balance data");

    let ctx = PluginContext::new();

    // Independent plugins; their calls run concurrently.
    let jobs = targets.into_iter().map(|plugin| {
        let id = plugin.metadata().id.clone();
        let config = match file.get(&id) {
            Ok(Some(config)) => Ok(config),
            Ok(None) => Ok(PluginConfig::new()),
            Err(e) => Err(e),
        };
        let ctx = ctx.clone();
        async move {
            let result = match config {
                Ok(config) => plugin
                    .fetch_data(&config, &ctx)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            (id, result)
        }
    });

    let results = join_all(jobs).await;

    let outputs: Vec<PluginReportOutput> = results
        .into_iter()
        .map(|(id, result)| match result {
            Ok(report) => PluginReportOutput::success(id, report),
            Err(error) => PluginReportOutput::failure(id, error),
        })
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_results(&outputs)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new();
            for output in &outputs {
                println!("{}", formatter.format_result(output));
                println!();
            }
        }
    }

    let failures = outputs.iter().filter(|o| o.error.is_some()).count();
    if failures == outputs.len() {
        bail!("all {failures} plugin fetches failed");
    }
    Ok(())
}
