//! Normalized balance contract.
//!
//! Every plugin adapts a different upstream billing/quota API into these two
//! types. The contract is a single shared product type: plugins construct
//! [`LimitEntry`] values directly and leave fields that do not apply as
//! `None` (omitted from serialization). Entries are built fresh on every
//! fetch and never merged across plugins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Data Type
// ============================================================================

/// Semantic category tag for plugin output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Balance/quota data.
    #[default]
    Balance,
}

// ============================================================================
// Limit Status
// ============================================================================

/// Health flag for a limit entry nearing expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitStatus {
    /// Entry is in good standing.
    Active,
    /// Entry expires soon (3 days or fewer).
    Warning,
}

// ============================================================================
// Limit Entry
// ============================================================================

/// One quota/subscription line item in a [`BalanceReport`].
///
/// The meaning of `remaining` differs per plugin (credits, percentage
/// points, or quota units); `percentage` is consumed fraction × 100 and is
/// never clamped, so values above 100 pass through when usage is exceeded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitEntry {
    /// Upstream type/plan/model identifier.
    pub limit_type: String,

    /// Human-readable display name.
    pub label: String,

    /// Display unit (`$`, `%`, `tokens`, `次`, ...).
    pub unit: String,

    /// Total allotted quantity; `None` when the concept does not apply
    /// (pay-per-use mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<f64>,

    /// Amount consumed; `None` when not computable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,

    /// Amount left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<f64>,

    /// Consumed fraction × 100, rounded to the nearest integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,

    /// One-decimal usage percentage (Right.codes entries only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_percent: Option<f64>,

    /// Precomposed human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Next eligible reset time.
    ///
    /// `None` means "eligible now"; `Some` means "wait until this time".
    /// This polarity is load-bearing: [`LimitEntry::reset_today`] is derived
    /// from it and must not be inverted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_reset_time: Option<DateTime<Utc>>,

    /// Whether the reset allowance was already used today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_today: Option<bool>,

    /// Whether this entry is billed pay-per-use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pay_per_use: Option<bool>,

    /// Subscription expiry time (expiry-based plugins only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Pre-formatted expiry date for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at_formatted: Option<String>,

    /// Whole days until expiry, floored at 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,

    /// Last reset time reported by the upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reset_at: Option<DateTime<Utc>>,

    /// Health flag (expiry-based plugins only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LimitStatus>,
}

// ============================================================================
// Balance Report
// ============================================================================

/// Normalized result of one balance query.
///
/// `balance` is plugin-defined (summed credits, count of subscriptions,
/// average remaining fraction, or a constant 0) and is NOT comparable
/// across plugins; `currency` labels it for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    /// Constant tag `"balance"`.
    pub data_type: DataType,

    /// Plugin-defined numeric aggregate.
    pub balance: f64,

    /// Display unit for `balance` (free-form).
    pub currency: String,

    /// Ordered line items; order is meaningful where a plugin sorts by
    /// urgency.
    pub limits: Vec<LimitEntry>,

    /// Hint to a renderer on whether to display `balance` prominently.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_total: Option<bool>,

    /// When normalization occurred (capture time, not upstream time).
    pub last_updated: DateTime<Utc>,
}

impl BalanceReport {
    /// Creates a report stamped with the current time.
    pub fn new(balance: f64, currency: impl Into<String>, limits: Vec<LimitEntry>) -> Self {
        Self {
            data_type: DataType::Balance,
            balance,
            currency: currency.into(),
            limits,
            show_total: None,
            last_updated: Utc::now(),
        }
    }

    /// Returns the highest non-null percentage across all entries.
    pub fn max_percentage(&self) -> Option<f64> {
        self.limits
            .iter()
            .filter_map(|l| l.percentage.or(l.usage_percent))
            .fold(None, |max, p| Some(max.map_or(p, |m: f64| m.max(p))))
    }

    /// Returns true if any entry is present.
    pub fn has_limits(&self) -> bool {
        !self.limits.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_construction() {
        let report = BalanceReport::new(12.5, "USD", vec![]);
        assert_eq!(report.data_type, DataType::Balance);
        assert_eq!(report.balance, 12.5);
        assert_eq!(report.currency, "USD");
        assert!(!report.has_limits());
    }

    #[test]
    fn test_max_percentage_prefers_any_non_null() {
        let report = BalanceReport::new(0.0, "%", vec![
            LimitEntry {
                percentage: Some(60.0),
                ..LimitEntry::default()
            },
            LimitEntry {
                usage_percent: Some(75.5),
                ..LimitEntry::default()
            },
            LimitEntry::default(),
        ]);
        assert_eq!(report.max_percentage(), Some(75.5));
    }

    #[test]
    fn test_max_percentage_empty() {
        let report = BalanceReport::new(0.0, "%", vec![LimitEntry::default()]);
        assert_eq!(report.max_percentage(), None);
    }

    #[test]
    fn test_percentage_not_clamped() {
        // Over-limit usage keeps a >100 percentage; the contract forbids
        // clamping.
        let entry = LimitEntry {
            percentage: Some(130.0),
            ..LimitEntry::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["percentage"], 130.0);
    }
}
