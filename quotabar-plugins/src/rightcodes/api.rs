//! Right.codes API client.

use quotabar_core::PluginError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, instrument};

// ============================================================================
// Constants
// ============================================================================

/// Subscription-list endpoint.
const API_URL: &str = "https://www.right.codes/subscriptions/list";

// ============================================================================
// API Response Types
// ============================================================================

/// Top-level response; the upstream has no success envelope.
#[derive(Debug, Deserialize)]
pub struct SubscriptionListResponse {
    /// Raw subscription records (snake_case upstream).
    #[serde(default)]
    pub subscriptions: Vec<RawSubscription>,
}

/// One raw subscription record.
#[derive(Debug, Default, Deserialize)]
pub struct RawSubscription {
    /// Upstream record id.
    #[serde(default)]
    pub id: Option<i64>,

    /// Display name of the subscription.
    #[serde(default)]
    pub name: Option<String>,

    /// Total quota allotment.
    #[serde(default)]
    pub total_quota: Option<f64>,

    /// Quota left.
    #[serde(default)]
    pub remaining_quota: Option<f64>,

    /// Expiry time; missing means already expired.
    #[serde(default)]
    pub expired_at: Option<String>,

    /// Whether the daily reset was already used.
    #[serde(default)]
    pub reset_today: Option<bool>,

    /// Last reset time reported by the upstream.
    #[serde(default)]
    pub last_reset_at: Option<String>,
}

// ============================================================================
// API Client
// ============================================================================

/// Right.codes API client.
///
/// Error handling is deliberately coarser than the other plugins: any
/// non-2xx response is a generic HTTP error, with no 401/403 distinction.
#[derive(Debug, Clone)]
pub struct RightCodesApiClient {
    http: reqwest::Client,
}

impl RightCodesApiClient {
    /// Creates a client on top of the shared HTTP client.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetches the subscription list.
    #[instrument(skip(self, api_key))]
    pub async fn fetch_subscriptions(
        &self,
        api_key: &str,
    ) -> Result<SubscriptionListResponse, PluginError> {
        debug!("Fetching Right.codes subscriptions");

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

        // No envelope to check; a malformed body propagates as-is.
        serde_json::from_str(&body).map_err(|e| PluginError::Parse(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
