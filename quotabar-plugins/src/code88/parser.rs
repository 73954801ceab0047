//! Normalization of 88Code subscription data.
//!
//! Filters active subscriptions, classifies each as subscription-mode or
//! pay-per-use, and maps them into the shared balance contract.

use chrono::{DateTime, Utc};
use quotabar_core::{BalanceReport, LimitEntry, PluginError};
use tracing::debug;

use super::api::{RawSubscription, SubscriptionEnvelope};
use crate::util::{parse_datetime, round2};

// ============================================================================
// Report Assembly
// ============================================================================

/// Builds the normalized report from a parsed envelope.
pub(crate) fn build_report(
    envelope: SubscriptionEnvelope,
    now: DateTime<Utc>,
) -> Result<BalanceReport, PluginError> {
    if envelope.code != Some(0) || envelope.ok != Some(true) {
        return Err(PluginError::Api(envelope.msg.unwrap_or_else(|| {
            format!(
                "API error: {}",
                envelope
                    .code
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string())
            )
        })));
    }

    let subscriptions = envelope.data;
    if subscriptions.is_empty() {
        return Err(PluginError::NoData("no subscriptions found".to_string()));
    }

    let active: Vec<&RawSubscription> = subscriptions
        .iter()
        .filter(|sub| is_active(sub, now))
        .collect();

    if active.is_empty() {
        // Report the first record's status for diagnostics.
        let status = subscriptions[0]
            .subscription_status
            .as_deref()
            .unwrap_or("未知");
        return Err(PluginError::NoData(format!(
            "no active subscriptions (status: {status})"
        )));
    }

    let limits = active.iter().map(|sub| to_limit_entry(sub, now)).collect();
    let total: f64 = active.iter().filter_map(|sub| sub.current_credits).sum();

    let mut report = BalanceReport::new(round2(total), "USD", limits);
    report.show_total = Some(false);
    Ok(report)
}

/// Active means the upstream marks it active AND the start date has passed.
fn is_active(sub: &RawSubscription, now: DateTime<Utc>) -> bool {
    let marked_active =
        sub.subscription_status.as_deref() == Some("活跃中") || sub.is_active == Some(true);
    marked_active && has_started(sub.start_date.as_deref(), now)
}

fn has_started(start_date: Option<&str>, now: DateTime<Utc>) -> bool {
    start_date
        .and_then(parse_datetime)
        .is_some_and(|start| start <= now)
}

// ============================================================================
// Pay-Per-Use Classification
// ============================================================================

/// Pay-per-use detection over heterogeneous upstream fields.
///
/// Checked in priority order; the first match wins.
fn is_pay_per_use(sub: &RawSubscription) -> bool {
    matches_pay_per_use_plan_type(sub)
        || matches_pay_per_use_plan_name(sub)
        || looks_structurally_pay_per_use(sub)
}

/// Explicit plan-type values the upstream uses for metered billing.
fn matches_pay_per_use_plan_type(sub: &RawSubscription) -> bool {
    let plan_type = sub
        .subscription_plan
        .as_ref()
        .and_then(|plan| plan.plan_type.as_deref())
        .unwrap_or("")
        .to_uppercase();
    matches!(plan_type.as_str(), "PAY_PER_USE" | "PAYGO" | "PAY_AS_YOU_GO")
}

/// Plan-name keywords seen on metered plans.
fn matches_pay_per_use_plan_name(sub: &RawSubscription) -> bool {
    let name = sub
        .subscription_plan_name
        .as_deref()
        .unwrap_or("")
        .to_uppercase();
    name.contains("PAYGO") || name.contains("按量") || name.contains("PAY_PER_USE")
}

/// Structural inference: no fixed credit limit but a live balance, and no
/// reset capability.
fn looks_structurally_pay_per_use(sub: &RawSubscription) -> bool {
    let credit_limit = sub
        .subscription_plan
        .as_ref()
        .and_then(|plan| plan.credit_limit);
    let no_limit = credit_limit.is_none() || credit_limit == Some(0.0);
    let has_balance = sub.current_credits.is_some_and(|credits| credits >= 0.0);
    let no_reset = sub.can_reset_now != Some(true) && next_reset_time(sub).is_none();

    no_limit && has_balance && no_reset
}

// ============================================================================
// Limit Entries
// ============================================================================

fn to_limit_entry(sub: &RawSubscription, now: DateTime<Utc>) -> LimitEntry {
    let current_credits = sub.current_credits.unwrap_or(0.0);
    let pay_per_use = is_pay_per_use(sub);
    let next_reset = next_reset_time(sub);
    let days = sub.remaining_days.unwrap_or(0);

    debug!(
        plan = sub.subscription_plan_name.as_deref().unwrap_or("-"),
        plan_type = sub
            .subscription_plan
            .as_ref()
            .and_then(|p| p.plan_type.as_deref())
            .unwrap_or("-"),
        credit_limit = ?sub.subscription_plan.as_ref().and_then(|p| p.credit_limit),
        pay_per_use,
        next_reset = ?next_reset,
        "Classified subscription"
    );

    // Pay-per-use: only the remaining balance and days left; no quota,
    // no percentage, no reset info.
    if pay_per_use {
        return LimitEntry {
            limit_type: sub
                .subscription_plan_name
                .clone()
                .unwrap_or_else(|| "PAY_PER_USE".to_string()),
            label: sub
                .subscription_plan_name
                .clone()
                .unwrap_or_else(|| "按量付费".to_string()),
            unit: "$".to_string(),
            remaining: Some(current_credits),
            status_text: Some(format!("剩余 {days} 天")),
            is_pay_per_use: Some(true),
            ..LimitEntry::default()
        };
    }

    // Subscription mode: full quota and reset info.
    let credit_limit = sub
        .subscription_plan
        .as_ref()
        .and_then(|plan| plan.credit_limit)
        .unwrap_or(0.0);
    let used = credit_limit - current_credits;
    let percentage = if credit_limit > 0.0 {
        (used / credit_limit * 100.0).round()
    } else {
        0.0
    };

    let status_text = format!(
        "剩余 {days} 天 | {}",
        reset_status_text(next_reset, sub.reset_times)
    );

    LimitEntry {
        limit_type: sub
            .subscription_plan_name
            .clone()
            .unwrap_or_else(|| "SUBSCRIPTION".to_string()),
        label: sub
            .subscription_plan_name
            .clone()
            .unwrap_or_else(|| "订阅套餐".to_string()),
        unit: "$".to_string(),
        usage: Some(credit_limit),
        remaining: Some(current_credits),
        current_value: Some(used.max(0.0)),
        percentage: Some(percentage),
        next_reset_time: next_reset,
        status_text: Some(status_text),
        // A pending reset time means today's reset was already used.
        reset_today: Some(next_reset.is_some()),
        is_pay_per_use: Some(false),
        ..LimitEntry::default()
    }
}

fn next_reset_time(sub: &RawSubscription) -> Option<DateTime<Utc>> {
    sub.next_reset_available_at
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .and_then(parse_datetime)
}

/// Reset eligibility phrase.
///
/// `next_reset` present means the allowance was used and the holder must
/// wait until that time; absent means a reset is available right now,
/// qualified with the remaining count while fewer than two were used.
fn reset_status_text(next_reset: Option<DateTime<Utc>>, reset_times: Option<i64>) -> String {
    if let Some(at) = next_reset {
        return format!("{} 可重置", at.format("%m-%d %H:%M"));
    }

    if let Some(times) = reset_times {
        if times < 2 {
            return format!("可重置 ({}/2)", 2 - times);
        }
    }

    "可重置".to_string()
}

// ============================================================================
// Tests
// ============================================================================
