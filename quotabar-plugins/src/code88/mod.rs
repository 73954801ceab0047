//! 88Code subscription balance plugin.
//!
//! Queries subscription plan usage, remaining days, and reset status.
//! Handles both subscription and pay-per-use plans.

mod api;
mod parser;

pub use api::Code88ApiClient;

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
struct Code88Config {
    #[serde(default)]
    auth_token: Option<String>,
}

/// 88Code subscription balance plugin.
pub struct Code88Plugin {
    metadata: PluginMetadata,
}

impl Code88Plugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                "88code-balance",
                "88Code Subscription Balance",
                "1.0.7",
                "Queries 88Code subscription quota usage, remaining days, and reset status",
            ),
        }
    }

    async fn fetch_inner(
        &self,
        config: &PluginConfig,
        ctx: &PluginContext,
    ) -> Result<BalanceReport, PluginError> {
        let cfg: Code88Config = config.typed()?;
        let token = cfg
            .auth_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| PluginError::InvalidConfig("authToken is required".to_string()))?;

        ctx.log(LogLevel::Info, "Requesting 88Code API...");

        let client = Code88ApiClient::new(ctx.http().clone());
        let envelope = client.fetch_subscriptions(token).await?;
        parser::build_report(envelope, Utc::now())
    }
}

impl Default for Code88Plugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalancePlugin for Code88Plugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_config(&self, config: &PluginConfig) -> ConfigCheck {
        match config.get_str("authToken") {
            None | Some("") => ConfigCheck::invalid("Authorization Token is required"),
            Some(token) if token.len() < 10 => {
                ConfigCheck::invalid("Token looks malformed (too short)")
            }
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
            Ok(report) => {
                ctx.log(
                    LogLevel::Info,
                    &format!("Fetched {} active 88Code subscriptions", report.limits.len()),
                );
                Ok(report)
            }
            Err(err) => {
                ctx.log(
                    LogLevel::Error,
                    &format!("Failed to fetch 88Code balance: {err}"),
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
        let plugin = Code88Plugin::new();
        assert_eq!(plugin.metadata().id, "88code-balance");
        assert_eq!(plugin.metadata().version, "1.0.7");
    }

    #[test]
    fn test_validate_config() {
        let plugin = Code88Plugin::new();

        let missing = plugin.validate_config(&PluginConfig::new());
        assert!(!missing.valid);

        let short = plugin.validate_config(&PluginConfig::new().with("authToken", "short"));
        assert!(!short.valid);
        assert!(short.message.unwrap().contains("too short"));

        let ok = plugin.validate_config(&PluginConfig::new().with("authToken", "tok-1234567890"));
        assert!(ok.valid);
    }

    #[tokio::test]
    async fn test_fetch_data_requires_token() {
        let plugin = Code88Plugin::new();
        let ctx = PluginContext::new();

        let err = plugin
            .fetch_data(&PluginConfig::new(), &ctx)
            .await
            .unwrap_err();
        assert!(err.is_config_error());

        // Whitespace-only tokens count as absent.
        let err = plugin
            .fetch_data(&PluginConfig::new().with("authToken", "   "), &ctx)
            .await
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
