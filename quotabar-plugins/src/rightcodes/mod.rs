//! Right.codes subscription plugin.
//!
//! Queries the subscription list and checks expiry status.

mod api;
mod parser;

pub use api::RightCodesApiClient;

use async_trait::async_trait;
use chrono::Utc;
use quotabar_core::{BalanceReport, ConfigCheck, PluginConfig, PluginError, PluginMetadata};
use serde::Deserialize;
use tracing::instrument;

use crate::context::{LogLevel, PluginContext};
use crate::plugin::BalancePlugin;

/// Typed view of the host-supplied configuration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RightCodesConfig {
    #[serde(default)]
    api_key: Option<String>,
}

/// Right.codes subscription plugin.
pub struct RightCodesPlugin {
    metadata: PluginMetadata,
}

impl RightCodesPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                "right-code",
                "Right.codes Subscriptions",
                "1.0.1",
                "Queries Right.codes subscription quotas and expiry times",
            ),
        }
    }

    async fn fetch_inner(
        &self,
        config: &PluginConfig,
        ctx: &PluginContext,
    ) -> Result<BalanceReport, PluginError> {
        let cfg: RightCodesConfig = config.typed()?;
        let api_key = cfg
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PluginError::InvalidConfig("apiKey is required".to_string()))?;

        let client = RightCodesApiClient::new(ctx.http().clone());
        let response = client.fetch_subscriptions(api_key).await?;
        parser::build_report(response, Utc::now())
    }
}

impl Default for RightCodesPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalancePlugin for RightCodesPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_config(&self, config: &PluginConfig) -> ConfigCheck {
        match config.get_str("apiKey") {
            None | Some("") => ConfigCheck::invalid("Authorization Token is required"),
            Some(key) if key.len() < 10 => ConfigCheck::invalid("Token looks malformed"),
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
                    &format!("Failed to fetch Right.codes subscriptions: {err}"),
                );
                Err(err)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let plugin = RightCodesPlugin::new();
        assert_eq!(plugin.metadata().id, "right-code");
    }

    #[test]
    fn test_validate_config() {
        let plugin = RightCodesPlugin::new();

        assert!(!plugin.validate_config(&PluginConfig::new()).valid);
        assert!(!plugin
            .validate_config(&PluginConfig::new().with("apiKey", "short"))
            .valid);
        assert!(plugin
            .validate_config(&PluginConfig::new().with("apiKey", "key-1234567890"))
            .valid);
    }

    #[tokio::test]
    async fn test_fetch_data_requires_api_key() {
        let plugin = RightCodesPlugin::new();
        let ctx = PluginContext::new();

        let err = plugin
            .fetch_data(&PluginConfig::new(), &ctx)
            .await
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
