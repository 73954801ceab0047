//! Antigravity model quota plugin.
//!
//! Queries per-model quota usage and reset times for Google Cloud Code.

mod api;
mod parser;

pub use api::{AntigravityApiClient, AntigravityCredentials};

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
struct AntigravityConfig {
    #[serde(default)]
    authorization: Option<String>,
    #[serde(default)]
    user_agent: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    client_id: Option<String>,
}

impl AntigravityConfig {
    /// Resolves the four mandatory header values, trimmed.
    fn credentials(&self) -> Result<AntigravityCredentials, PluginError> {
        Ok(AntigravityCredentials {
            authorization: require(self.authorization.as_deref(), "authorization is required")?,
            user_agent: require(self.user_agent.as_deref(), "userAgent is required")?,
            client_secret: require(self.client_secret.as_deref(), "clientSecret is required")?,
            client_id: require(self.client_id.as_deref(), "clientId is required")?,
        })
    }
}

fn require(value: Option<&str>, message: &str) -> Result<String, PluginError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| PluginError::InvalidConfig(message.to_string()))
}

/// Antigravity model quota plugin.
pub struct AntigravityPlugin {
    metadata: PluginMetadata,
}

impl AntigravityPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                "antigravity",
                "Antigravity Quota",
                "1.0.0",
                "Queries per-model quota usage and reset times for Google Cloud Code",
            ),
        }
    }

    async fn fetch_inner(
        &self,
        config: &PluginConfig,
        ctx: &PluginContext,
    ) -> Result<BalanceReport, PluginError> {
        let cfg: AntigravityConfig = config.typed()?;
        let credentials = cfg.credentials()?;

        ctx.log(LogLevel::Info, "Requesting Antigravity API...");

        let client = AntigravityApiClient::new(ctx.http().clone());
        let envelope = client.fetch_models(&credentials).await?;
        let report = parser::build_report(envelope, Utc::now())?;

        ctx.log(
            LogLevel::Info,
            &format!(
                "Fetched {} model quotas, average {}% remaining",
                report.limits.len(),
                report.balance
            ),
        );
        Ok(report)
    }
}

impl Default for AntigravityPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalancePlugin for AntigravityPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn validate_config(&self, config: &PluginConfig) -> ConfigCheck {
        let required = [
            ("authorization", "Authorization is required"),
            ("userAgent", "User-Agent is required"),
            ("clientSecret", "Client Secret is required"),
            ("clientId", "Client ID is required"),
        ];

        for (key, message) in required {
            match config.get_str(key) {
                None | Some("") => return ConfigCheck::invalid(message),
                Some(_) => {}
            }
        }
        ConfigCheck::ok()
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
                    &format!("Failed to fetch Antigravity quotas: {err}"),
                );
                Err(err)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
