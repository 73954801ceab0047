//! Normalization of Right.codes subscription data.
//!
//! Drops expired subscriptions and maps the rest into the shared contract
//! with days-remaining and a one-decimal usage percentage.

use chrono::{DateTime, Utc};
use quotabar_core::{BalanceReport, LimitEntry, LimitStatus, PluginError};

use super::api::{RawSubscription, SubscriptionListResponse};
use crate::util::{parse_datetime, round1};

/// Days at or under which an entry is flagged as a warning.
const WARNING_DAYS: i64 = 3;

// ============================================================================
// Report Assembly
// ============================================================================

/// Builds the normalized report from a parsed subscription list.
pub(crate) fn build_report(
    response: SubscriptionListResponse,
    now: DateTime<Utc>,
) -> Result<BalanceReport, PluginError> {
    // Expired subscriptions are dropped entirely, never emitted with zero
    // days remaining.
    let valid: Vec<&RawSubscription> = response
        .subscriptions
        .iter()
        .filter(|sub| !is_expired(sub.expired_at.as_deref(), now))
        .collect();

    if valid.is_empty() {
        return Err(PluginError::NoData("no valid subscriptions".to_string()));
    }

    let limits = valid.iter().map(|sub| to_limit_entry(sub, now)).collect();

    // The aggregate here is a count, not a credit sum; the currency string
    // is a count-noun label rather than an ISO code.
    Ok(BalanceReport::new(
        valid.len() as f64,
        "个有效订阅",
        limits,
    ))
}

/// Missing or unparseable expiry counts as already expired.
fn is_expired(expired_at: Option<&str>, now: DateTime<Utc>) -> bool {
    match expired_at.and_then(parse_datetime) {
        Some(expiry) => now > expiry,
        None => true,
    }
}

/// Whole days until expiry, rounded up, floored at 0.
fn days_remaining(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (expiry - now).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms as f64 / 86_400_000.0).ceil() as i64
}

// ============================================================================
// Limit Entries
// ============================================================================

fn to_limit_entry(sub: &RawSubscription, now: DateTime<Utc>) -> LimitEntry {
    let expiry = sub.expired_at.as_deref().and_then(parse_datetime);
    let days = expiry.map_or(0, |e| days_remaining(e, now));

    let total = sub.total_quota.unwrap_or(0.0);
    let remaining = sub.remaining_quota.unwrap_or(0.0);
    let used = total - remaining;
    let usage_percent = if total > 0.0 {
        round1(used / total * 100.0)
    } else {
        0.0
    };

    let status = if days <= WARNING_DAYS {
        LimitStatus::Warning
    } else {
        LimitStatus::Active
    };

    LimitEntry {
        limit_type: format!(
            "subscription_{}",
            sub.id.map_or_else(|| "unknown".to_string(), |id| id.to_string())
        ),
        label: sub.name.clone().unwrap_or_default(),
        unit: "$".to_string(),
        usage: Some(total),
        current_value: Some(used),
        remaining: Some(remaining),
        usage_percent: Some(usage_percent),
        expires_at: expiry,
        expires_at_formatted: Some(
            expiry.map_or_else(|| "未知".to_string(), |e| e.format("%Y/%m/%d").to_string()),
        ),
        days_remaining: Some(days),
        reset_today: sub.reset_today,
        last_reset_at: sub.last_reset_at.as_deref().and_then(parse_datetime),
        status: Some(status),
        status_text: Some(format!("剩余 {days} 天")),
        ..LimitEntry::default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn sub(id: i64, total: f64, remaining: f64, expiry: Option<DateTime<Utc>>) -> RawSubscription {
        RawSubscription {
            id: Some(id),
            name: Some(format!("Plan {id}")),
            total_quota: Some(total),
            remaining_quota: Some(remaining),
            expired_at: expiry.map(|e| e.to_rfc3339()),
            ..RawSubscription::default()
        }
    }

    fn response(subscriptions: Vec<RawSubscription>) -> SubscriptionListResponse {
        SubscriptionListResponse { subscriptions }
    }

    #[test]
    fn test_entry_end_to_end() {
        // total=100, remaining=25, expiry 10 days out.
        let report = build_report(
            response(vec![sub(1, 100.0, 25.0, Some(now() + Duration::days(10)))]),
            now(),
        )
        .unwrap();

        assert_eq!(report.balance, 1.0);
        assert_eq!(report.currency, "个有效订阅");
        assert!(report.show_total.is_none());

        let entry = &report.limits[0];
        assert_eq!(entry.current_value, Some(75.0));
        assert_eq!(entry.usage_percent, Some(75.0));
        assert_eq!(entry.days_remaining, Some(10));
        assert_eq!(entry.status, Some(LimitStatus::Active));
        assert_eq!(entry.status_text.as_deref(), Some("剩余 10 天"));
        assert_eq!(entry.limit_type, "subscription_1");
    }

    #[test]
    fn test_expired_subscriptions_excluded_entirely() {
        let report = build_report(
            response(vec![
                sub(1, 100.0, 50.0, Some(now() - Duration::days(1))),
                sub(2, 100.0, 50.0, Some(now() + Duration::days(30))),
            ]),
            now(),
        )
        .unwrap();

        // The expired one is gone, not present with daysRemaining = 0.
        assert_eq!(report.limits.len(), 1);
        assert_eq!(report.limits[0].limit_type, "subscription_2");
        assert_eq!(report.balance, 1.0);
    }

    #[test]
    fn test_missing_expiry_counts_as_expired() {
        let err = build_report(response(vec![sub(1, 100.0, 50.0, None)]), now()).unwrap_err();
        assert!(matches!(err, PluginError::NoData(_)));
    }

    #[test]
    fn test_unparseable_expiry_counts_as_expired() {
        let mut s = sub(1, 100.0, 50.0, None);
        s.expired_at = Some("soon".to_string());

        let err = build_report(response(vec![s]), now()).unwrap_err();
        assert!(matches!(err, PluginError::NoData(_)));
    }

    #[test]
    fn test_warning_at_three_days() {
        let report = build_report(
            response(vec![
                sub(1, 100.0, 50.0, Some(now() + Duration::days(3))),
                sub(2, 100.0, 50.0, Some(now() + Duration::days(4))),
            ]),
            now(),
        )
        .unwrap();

        assert_eq!(report.limits[0].status, Some(LimitStatus::Warning));
        assert_eq!(report.limits[1].status, Some(LimitStatus::Active));
    }

    #[test]
    fn test_days_remaining_rounds_up() {
        let expiry = now() + Duration::hours(36);
        assert_eq!(days_remaining(expiry, now()), 2);

        let report = build_report(response(vec![sub(1, 100.0, 50.0, Some(expiry))]), now()).unwrap();
        assert_eq!(report.limits[0].days_remaining, Some(2));
    }

    #[test]
    fn test_zero_total_quota() {
        let report = build_report(
            response(vec![sub(1, 0.0, 0.0, Some(now() + Duration::days(10)))]),
            now(),
        )
        .unwrap();
        assert_eq!(report.limits[0].usage_percent, Some(0.0));
    }

    #[test]
    fn test_one_decimal_usage_percent() {
        // 33/99 used → 33.33…% → 33.3 at one decimal.
        let report = build_report(
            response(vec![sub(1, 99.0, 66.0, Some(now() + Duration::days(10)))]),
            now(),
        )
        .unwrap();
        assert_eq!(report.limits[0].usage_percent, Some(33.3));
    }

    #[test]
    fn test_balance_counts_valid_subscriptions() {
        let report = build_report(
            response(vec![
                sub(1, 100.0, 50.0, Some(now() + Duration::days(5))),
                sub(2, 100.0, 50.0, Some(now() + Duration::days(6))),
                sub(3, 100.0, 50.0, Some(now() - Duration::days(1))),
            ]),
            now(),
        )
        .unwrap();
        assert_eq!(report.balance, 2.0);
    }
}
