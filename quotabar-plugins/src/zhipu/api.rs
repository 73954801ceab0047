//! Zhipu AI (BigModel) API client.

use quotabar_core::PluginError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, instrument};

// ============================================================================
// Constants
// ============================================================================

/// Quota-limit endpoint.
const API_URL: &str = "https://bigmodel.cn/api/monitor/usage/quota/limit";

// ============================================================================
// API Response Types
// ============================================================================

/// Top-level envelope of the quota-limit endpoint.
#[derive(Debug, Deserialize)]
pub struct QuotaLimitEnvelope {
    /// Application-level status code; `200` means success.
    #[serde(default)]
    pub code: Option<i64>,

    /// Application-level success flag.
    #[serde(default)]
    pub success: Option<bool>,

    /// Upstream-supplied error message.
    #[serde(default)]
    pub msg: Option<String>,

    /// Payload.
    #[serde(default)]
    pub data: Option<QuotaLimitData>,
}

/// Payload wrapper around the limit list.
#[derive(Debug, Default, Deserialize)]
pub struct QuotaLimitData {
    /// Typed limit entries.
    #[serde(default)]
    pub limits: Vec<RawLimit>,
}

/// One typed limit entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLimit {
    /// Limit type code (e.g. `TIME_LIMIT`, `TOKENS_LIMIT`).
    #[serde(rename = "type", default)]
    pub limit_type: Option<String>,

    /// Total allotment.
    #[serde(default)]
    pub usage: Option<f64>,

    /// Amount consumed.
    #[serde(default)]
    pub current_value: Option<f64>,

    /// Amount left.
    #[serde(default)]
    pub remaining: Option<f64>,

    /// Next reset time.
    #[serde(default)]
    pub next_reset_time: Option<String>,
}

// ============================================================================
// API Client
// ============================================================================

/// Zhipu AI API client.
///
/// Generic HTTP error handling only; auth failures are not distinguished.
#[derive(Debug, Clone)]
pub struct ZhipuApiClient {
    http: reqwest::Client,
}

impl ZhipuApiClient {
    /// Creates a client on top of the shared HTTP client.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetches the quota-limit envelope.
    #[instrument(skip(self, api_key))]
    pub async fn fetch_quota_limits(
        &self,
        api_key: &str,
    ) -> Result<QuotaLimitEnvelope, PluginError> {
        debug!("Fetching Zhipu quota limits");

        let response = self
            .http
            .get(API_URL)
            .header(AUTHORIZATION, api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| PluginError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PluginError::Http(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PluginError::Http(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| PluginError::Parse(e.to_string()))
    }
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
            "code": 200,
            "success": true,
            "data": {
                "limits": [
                    {
                        "type": "TOKENS_LIMIT",
                        "usage": 1000000,
                        "currentValue": 250000,
                        "remaining": 750000,
                        "nextResetTime": "2024-06-02T00:00:00Z"
                    }
                ]
            }
        }"#;

        let envelope: QuotaLimitEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.code, Some(200));
        assert_eq!(envelope.success, Some(true));

        let limits = &envelope.data.unwrap().limits;
        assert_eq!(limits.len(), 1);
        assert_eq!(limits[0].limit_type.as_deref(), Some("TOKENS_LIMIT"));
        assert_eq!(limits[0].current_value, Some(250_000.0));
    }

    #[test]
    fn test_parse_envelope_missing_data() {
        let envelope: QuotaLimitEnvelope = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.success.is_none());
    }
}
