//! Antigravity quota API client.

use std::collections::BTreeMap;

use quotabar_core::PluginError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::util::truncate_chars;

// ============================================================================
// Constants
// ============================================================================

/// Multi-model quota endpoint.
const API_URL: &str =
    "https://daily-cloudcode-pa.sandbox.googleapis.com/v1internal:fetchAvailableModels";

// ============================================================================
// API Response Types
// ============================================================================

/// Top-level response: a mapping from model id to model info.
#[derive(Debug, Deserialize)]
pub struct ModelsEnvelope {
    /// Model id → model info. A `BTreeMap` keeps iteration deterministic
    /// when remaining fractions tie.
    #[serde(default)]
    pub models: BTreeMap<String, RawModel>,
}

/// One model's quota info.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModel {
    /// Display name; absent on models without a valid plan.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Quota details.
    #[serde(default)]
    pub quota_info: Option<RawQuotaInfo>,
}

/// Quota details nested in a model entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuotaInfo {
    /// Remaining fraction in [0, 1]; absent means untouched.
    #[serde(default)]
    pub remaining_fraction: Option<f64>,

    /// When this quota resets.
    #[serde(default)]
    pub reset_time: Option<String>,
}

/// Error body shape for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

// ============================================================================
// Credentials
// ============================================================================

/// The four header values the quota endpoint requires.
#[derive(Debug, Clone)]
pub struct AntigravityCredentials {
    /// `Authorization` header value.
    pub authorization: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// `client_secret` header value.
    pub client_secret: String,
    /// `client_id` header value.
    pub client_id: String,
}

// ============================================================================
// API Client
// ============================================================================

/// Antigravity API client.
#[derive(Debug, Clone)]
pub struct AntigravityApiClient {
    http: reqwest::Client,
}

impl AntigravityApiClient {
    /// Creates a client on top of the shared HTTP client.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetches the model quota map.
    ///
    /// The request is a POST with an empty JSON body; all credentials ride
    /// in headers.
    #[instrument(skip(self, credentials))]
    pub async fn fetch_models(
        &self,
        credentials: &AntigravityCredentials,
    ) -> Result<ModelsEnvelope, PluginError> {
        debug!("Fetching Antigravity model quotas");

        let response = self
            .http
            .post(API_URL)
            .header(AUTHORIZATION, credentials.authorization.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, credentials.user_agent.as_str())
            .header("client_secret", credentials.client_secret.as_str())
            .header("client_id", credentials.client_id.as_str())
            .body("{}")
            .send()
            .await
            .map_err(|e| PluginError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PluginError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_status(status, &body));
        }

        parse_envelope(&body)
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

fn error_from_status(status: StatusCode, body: &str) -> PluginError {
    match status.as_u16() {
        403 => PluginError::AuthenticationFailed("HTTP 403: token may be expired".to_string()),
        401 => PluginError::AuthenticationFailed("HTTP 401: check the credentials".to_string()),
        _ => PluginError::Http(http_error_message(status, body)),
    }
}

fn http_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = err.error.and_then(|detail| detail.message) {
            return msg;
        }
    } else if body.len() < 200 {
        return format!("HTTP {}: {}", status.as_u16(), body);
    }
    format!("HTTP {}", status.as_u16())
}

fn parse_envelope(body: &str) -> Result<ModelsEnvelope, PluginError> {
    serde_json::from_str(body)
        .map_err(|_| PluginError::Parse(truncate_chars(body, 100).to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let json = r#"{
            "models": {
                "gemini-pro": {
                    "displayName": "Gemini Pro",
                    "quotaInfo": { "remainingFraction": 0.8, "resetTime": "2024-06-01T18:00:00Z" }
                },
                "internal": {}
            }
        }"#;

        let envelope = parse_envelope(json).unwrap();
        assert_eq!(envelope.models.len(), 2);

        let pro = &envelope.models["gemini-pro"];
        assert_eq!(pro.display_name.as_deref(), Some("Gemini Pro"));
        assert_eq!(
            pro.quota_info.as_ref().unwrap().remaining_fraction,
            Some(0.8)
        );
        assert!(envelope.models["internal"].display_name.is_none());
    }

    #[test]
    fn test_parse_envelope_invalid() {
        assert!(matches!(
            parse_envelope("<!doctype html>"),
            Err(PluginError::Parse(_))
        ));
    }

    #[test]
    fn test_error_from_status_google_shape() {
        let body = r#"{"error": {"message": "Quota project not found", "code": 404}}"#;
        let err = error_from_status(StatusCode::NOT_FOUND, body);
        assert_eq!(err.to_string(), "HTTP error: Quota project not found");
    }

    #[test]
    fn test_error_from_status_auth() {
        assert!(error_from_status(StatusCode::FORBIDDEN, "").is_auth_error());
        assert!(error_from_status(StatusCode::UNAUTHORIZED, "").is_auth_error());
    }
}
