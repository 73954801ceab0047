//! Balance plugin trait.
//!
//! Every plugin exposes the same four entry points to the host: static
//! metadata, a synchronous config check, the async fetch, and log-only
//! lifecycle hooks. Plugins are independent adapters; nothing here implies
//! shared runtime logic beyond this interface.

use async_trait::async_trait;
use quotabar_core::{BalanceReport, ConfigCheck, PluginConfig, PluginError, PluginMetadata};

use crate::context::{LogLevel, PluginContext};

/// A balance query plugin.
///
/// ## Implementing a Plugin
///
/// ```ignore
/// struct MyPlugin { metadata: PluginMetadata }
///
/// #[async_trait]
/// impl BalancePlugin for MyPlugin {
///     fn metadata(&self) -> &PluginMetadata {
///         &self.metadata
///     }
///
///     fn validate_config(&self, config: &PluginConfig) -> ConfigCheck {
///         match config.get_str("apiKey") {
///             None | Some("") => ConfigCheck::invalid("API Key is required"),
///             Some(_) => ConfigCheck::ok(),
///         }
///     }
///
///     async fn fetch_data(
///         &self,
///         config: &PluginConfig,
///         ctx: &PluginContext,
///     ) -> Result<BalanceReport, PluginError> {
///         // One HTTP call, then synchronous normalization.
///     }
/// }
/// ```
#[async_trait]
pub trait BalancePlugin: Send + Sync {
    /// Static descriptor consumed by the host for discovery and display.
    fn metadata(&self) -> &PluginMetadata;

    /// Synchronous pre-flight check on required config fields.
    fn validate_config(&self, config: &PluginConfig) -> ConfigCheck;

    /// Fetches and normalizes balance data.
    ///
    /// One outbound network call, fully awaited, followed by synchronous
    /// transformation. Any failure voids the whole call: errors are logged
    /// once at `error` level and returned, never swallowed, retried, or
    /// downgraded to a partial result.
    async fn fetch_data(
        &self,
        config: &PluginConfig,
        ctx: &PluginContext,
    ) -> Result<BalanceReport, PluginError>;

    /// Lifecycle hook invoked after the host loads the plugin. Log-only.
    async fn on_load(&self, ctx: &PluginContext) {
        let meta = self.metadata();
        ctx.log(
            LogLevel::Info,
            &format!("{} plugin v{} loaded", meta.name, meta.version),
        );
    }

    /// Lifecycle hook invoked before the host unloads the plugin. Log-only.
    async fn on_unload(&self, ctx: &PluginContext) {
        let meta = self.metadata();
        ctx.log(LogLevel::Info, &format!("{} plugin unloaded", meta.name));
    }
}
