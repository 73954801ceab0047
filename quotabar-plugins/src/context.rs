//! Plugin execution context.
//!
//! The context is the single collaborator a plugin receives from the host:
//! a shared HTTP client and a `log` sink. Plugins hold no state of their
//! own, so one context can serve concurrent invocations.

use std::time::Duration;

use tracing::{debug, error, info, warn};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Quotabar.
const USER_AGENT: &str = concat!("Quotabar/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Log Level
// ============================================================================

/// Severity accepted from plugins through [`PluginContext::log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal progress messages.
    Info,
    /// Recoverable oddities.
    Warn,
    /// Failures surfaced to the host.
    Error,
}

// ============================================================================
// Plugin Context
// ============================================================================

/// Host services available to a plugin during `fetch_data`.
#[derive(Debug, Clone)]
pub struct PluginContext {
    http: reqwest::Client,
}

impl PluginContext {
    /// Creates a context with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a context with a custom request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This only occurs when the
    /// system's TLS configuration is fundamentally broken, which makes every
    /// plugin unusable anyway.
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| panic!("Failed to create HTTP client: {e}"));

        Self { http }
    }

    /// Returns the shared HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Forwards a plugin log message to the tracing subscriber.
    pub fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!("{message}"),
            LogLevel::Info => info!("{message}"),
            LogLevel::Warn => warn!("{message}"),
            LogLevel::Error => error!("{message}"),
        }
    }
}

impl Default for PluginContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = PluginContext::new();
        // Log sink accepts every level without a subscriber installed.
        ctx.log(LogLevel::Debug, "debug");
        ctx.log(LogLevel::Info, "info");
        ctx.log(LogLevel::Warn, "warn");
        ctx.log(LogLevel::Error, "error");
    }

    #[test]
    fn test_context_clone_shares_client() {
        let ctx = PluginContext::with_timeout(Duration::from_secs(5));
        let _clone = ctx.clone();
    }
}
