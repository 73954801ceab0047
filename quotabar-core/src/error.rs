//! Core error types for `Quotabar`.
//!
//! All plugins share one error enum. The taxonomy is consistent across
//! plugins; granularity varies by which variants a plugin constructs
//! (two of the four never produce [`PluginError::AuthenticationFailed`]).

use thiserror::Error;

/// Error type for balance plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Required configuration field missing or malformed.
    ///
    /// Raised synchronously, before any network call.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Upstream rejected the credentials (HTTP 401/403).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Transport failure or non-2xx response not otherwise classified.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body is not valid JSON.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// JSON parsed but the envelope's success indicator is false.
    ///
    /// Carries the upstream-supplied message.
    #[error("{0}")]
    Api(String),

    /// Request succeeded but no usable records remained after filtering.
    #[error("{0}")]
    NoData(String),
}

impl PluginError {
    /// Returns true if this error indicates a credentials problem.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Returns true if this error was produced before any network call.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}
