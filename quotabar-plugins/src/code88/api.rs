//! 88Code API client.

use quotabar_core::PluginError;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::util::truncate_chars;

// ============================================================================
// Constants
// ============================================================================

/// Subscription-info endpoint.
const API_URL: &str = "https://www.88code.org/admin-api/cc-admin/system/subscription/my";

// ============================================================================
// API Response Types
// ============================================================================

/// Top-level envelope of the subscription endpoint.
#[derive(Debug, Deserialize)]
pub struct SubscriptionEnvelope {
    /// Application-level status code; `0` means success.
    #[serde(default)]
    pub code: Option<i64>,

    /// Application-level success flag.
    #[serde(default)]
    pub ok: Option<bool>,

    /// Upstream-supplied error message.
    #[serde(default)]
    pub msg: Option<String>,

    /// Raw subscription records.
    #[serde(default)]
    pub data: Vec<RawSubscription>,
}

/// One raw subscription record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubscription {
    /// Upstream status label; "活跃中" marks an active subscription.
    #[serde(default)]
    pub subscription_status: Option<String>,

    /// Alternative active flag some accounts carry instead of the label.
    #[serde(default)]
    pub is_active: Option<bool>,

    /// When the subscription starts.
    #[serde(default)]
    pub start_date: Option<String>,

    /// Display name of the plan.
    #[serde(default)]
    pub subscription_plan_name: Option<String>,

    /// Plan details.
    #[serde(default)]
    pub subscription_plan: Option<RawPlan>,

    /// Remaining credits.
    #[serde(default)]
    pub current_credits: Option<f64>,

    /// Days until the subscription ends.
    #[serde(default)]
    pub remaining_days: Option<i64>,

    /// Whether a quota reset is currently allowed.
    #[serde(default)]
    pub can_reset_now: Option<bool>,

    /// Next time a reset becomes available; absent means "eligible now".
    #[serde(default)]
    pub next_reset_available_at: Option<String>,

    /// Resets already consumed in the current period.
    #[serde(default)]
    pub reset_times: Option<i64>,
}

/// Plan details nested in a subscription record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlan {
    /// Billing mode identifier (e.g. `PAY_PER_USE`).
    #[serde(default)]
    pub plan_type: Option<String>,

    /// Total credit allotment; absent or zero on metered plans.
    #[serde(default)]
    pub credit_limit: Option<f64>,
}

/// Error body shape for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
}

// ============================================================================
// API Client
// ============================================================================

/// 88Code API client.
#[derive(Debug, Clone)]
pub struct Code88ApiClient {
    http: reqwest::Client,
}

impl Code88ApiClient {
    /// Creates a client on top of the shared HTTP client.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetches the raw subscription envelope.
    ///
    /// The token is sent as-is in the `Authorization` header; the upstream
    /// does not use a `Bearer` prefix.
    #[instrument(skip(self, token))]
    pub async fn fetch_subscriptions(
        &self,
        token: &str,
    ) -> Result<SubscriptionEnvelope, PluginError> {
        debug!("Fetching 88Code subscriptions");

        let response = self
            .http
            .get(API_URL)
            .header(AUTHORIZATION, token)
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

/// Maps a non-2xx response to the error taxonomy.
///
/// 401/403 get distinguished authentication errors; everything else is a
/// transport error enriched with the upstream `msg` when available.
fn error_from_status(status: StatusCode, body: &str) -> PluginError {
    match status.as_u16() {
        403 => PluginError::AuthenticationFailed(
            "HTTP 403: token may be expired or malformed".to_string(),
        ),
        401 => PluginError::AuthenticationFailed(
            "HTTP 401: check that the token is correct".to_string(),
        ),
        _ => PluginError::Http(http_error_message(status, body)),
    }
}

fn http_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = err.msg {
            return msg;
        }
    } else if body.len() < 200 {
        return format!("HTTP {}: {}", status.as_u16(), body);
    }
    format!("HTTP {}", status.as_u16())
}

/// Parses the response body, reporting a truncated prefix on failure.
fn parse_envelope(body: &str) -> Result<SubscriptionEnvelope, PluginError> {
    serde_json::from_str(body)
        .map_err(|_| PluginError::Parse(truncate_chars(body, 100).to_string()))
}

// ============================================================================
// Tests
// ============================================================================
