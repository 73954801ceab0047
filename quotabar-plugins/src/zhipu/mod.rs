//! Zhipu AI (BigModel) balance plugin.
//!
//! Queries API quota usage across multiple limit types (`TIME_LIMIT`,
//! `TOKENS_LIMIT`).

mod api;
mod parser;

pub use api::ZhipuApiClient;

use async_trait::async_trait;
use quotabar_core::{BalanceReport, ConfigCheck, PluginConfig, PluginError, PluginMetadata};
use serde::Deserialize;
use tracing::instrument;

use crate::context::{LogLevel, PluginContext};
use crate::plugin::BalancePlugin;

/// Typed view of the host-supplied configuration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZhipuConfig {
    #[serde(default)]
    api_key: Option<String>,
}

/// Zhipu AI balance plugin.
pub struct ZhipuPlugin {
    metadata: PluginMetadata,
}

impl ZhipuPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                "zhipu-balance",
                "Zhipu AI Balance",
                "1.0.4",
                "Queries Zhipu AI (BigModel) quota usage across multiple limit types",
            ),
        }
    }

    async fn fetch_inner(
        &self,
        config: &PluginConfig,
        ctx: &PluginContext,
    ) -> Result<BalanceReport, PluginError> {
        // Only presence is checked here; the length rule lives in
        // `validate_config`.
        let cfg: ZhipuConfig = config.typed()?;
        let api_key = cfg
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PluginError::InvalidConfig("apiKey is required".to_string()))?;

        let client = ZhipuApiClient::new(ctx.http().clone());
        let envelope = client.fetch_quota_limits(api_key).await?;
        parser::build_report(envelope)
    }
}

impl Default for ZhipuPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalancePlugin for ZhipuPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_config(&self, config: &PluginConfig) -> ConfigCheck {
        match config.get_str("apiKey") {
            None | Some("") => ConfigCheck::invalid("API Key is required"),
            Some(key) if key.len() < 20 => ConfigCheck::invalid("API Key looks malformed"),
            Some(_) => ConfigCheck::ok(),
        }
    }

    #[instrument(skip(self, config, ctx))]
    async fn fetch_data(
        &self,
        config: &PluginConfig,
        ctx: &PluginContext,
    ) -> Result<BalanceReport, PluginError> {
        match self.fetch_inner(config, ctx).await {
            Ok(report) => Ok(report),
            Err(err) => {
                ctx.log(
                    LogLevel::Error,
                    &format!("Failed to fetch Zhipu balance: {err}"),
                );
                Err(err)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
