//! Normalization of Antigravity model quota data.
//!
//! Keeps models with a display name, sorts them so the most-exhausted model
//! comes first, and maps fractions into percentages.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use quotabar_core::{BalanceReport, LimitEntry, PluginError};

use super::api::{ModelsEnvelope, RawModel};
use crate::util::parse_datetime;

// ============================================================================
// Report Assembly
// ============================================================================

/// Builds the normalized report from a parsed model map.
pub(crate) fn build_report(
    envelope: ModelsEnvelope,
    now: DateTime<Utc>,
) -> Result<BalanceReport, PluginError> {
    if envelope.models.is_empty() {
        return Err(PluginError::NoData("no model data found".to_string()));
    }

    // A display name marks a model the account actually has a plan for.
    let mut kept: Vec<(String, RawModel)> = envelope
        .models
        .into_iter()
        .filter(|(_, model)| model.display_name.as_deref().is_some_and(|n| !n.is_empty()))
        .collect();

    if kept.is_empty() {
        return Err(PluginError::NoData("no valid model plans found".to_string()));
    }

    // Most-exhausted model first.
    kept.sort_by(|a, b| {
        remaining_fraction(&a.1)
            .partial_cmp(&remaining_fraction(&b.1))
            .unwrap_or(Ordering::Equal)
    });

    let limits = kept
        .iter()
        .map(|(id, model)| to_limit_entry(id, model, now))
        .collect();

    let avg_remaining =
        kept.iter().map(|(_, m)| remaining_fraction(m)).sum::<f64>() / kept.len() as f64;

    let mut report = BalanceReport::new((avg_remaining * 100.0).round(), "%", limits);
    report.show_total = Some(false);
    Ok(report)
}

/// Absent quota info counts as untouched.
fn remaining_fraction(model: &RawModel) -> f64 {
    model
        .quota_info
        .as_ref()
        .and_then(|quota| quota.remaining_fraction)
        .unwrap_or(1.0)
}

// ============================================================================
// Limit Entries
// ============================================================================

fn to_limit_entry(id: &str, model: &RawModel, now: DateTime<Utc>) -> LimitEntry {
    let remaining = remaining_fraction(model);
    let used = 1.0 - remaining;
    let reset_time = model
        .quota_info
        .as_ref()
        .and_then(|quota| quota.reset_time.as_deref())
        .and_then(parse_datetime);

    let mut status_text = format!("剩余 {}%", (remaining * 100.0).round());
    if let Some(reset) = reset_time {
        status_text.push_str(&format!(" | {}", format_reset_phrase(reset, now)));
    }

    LimitEntry {
        limit_type: id.to_string(),
        label: model.display_name.clone().unwrap_or_default(),
        unit: "%".to_string(),
        usage: Some(100.0),
        remaining: Some((remaining * 100.0).round()),
        current_value: Some((used * 100.0).round()),
        percentage: Some((used * 100.0).round()),
        next_reset_time: reset_time,
        status_text: Some(status_text),
        reset_today: Some(false),
        is_pay_per_use: Some(false),
        ..LimitEntry::default()
    }
}

/// Human reset-time phrase, bucketing the delta into days, hours+minutes,
/// or minutes. A reset time at or before `now` reads as "即将重置".
fn format_reset_phrase(reset: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = reset - now;
    if delta <= Duration::zero() {
        return "即将重置".to_string();
    }

    let hours = delta.num_hours();
    let minutes = delta.num_minutes() % 60;

    if hours > 24 {
        format!("{}天后重置", hours / 24)
    } else if hours > 0 {
        format!("{hours}小时{minutes}分后重置")
    } else {
        format!("{}分钟后重置", delta.num_minutes())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::api::RawQuotaInfo;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn model(display_name: Option<&str>, fraction: Option<f64>) -> RawModel {
        RawModel {
            display_name: display_name.map(String::from),
            quota_info: Some(RawQuotaInfo {
                remaining_fraction: fraction,
                reset_time: None,
            }),
        }
    }

    fn envelope(entries: Vec<(&str, RawModel)>) -> ModelsEnvelope {
        ModelsEnvelope {
            models: entries
                .into_iter()
                .map(|(id, m)| (id.to_string(), m))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_sorts_most_exhausted_first() {
        // A at 0.2 remaining, B at 0.8 remaining: A leads with 80% used.
        let report = build_report(
            envelope(vec![
                ("model-b", model(Some("Model B"), Some(0.8))),
                ("model-a", model(Some("Model A"), Some(0.2))),
            ]),
            now(),
        )
        .unwrap();

        assert_eq!(report.limits[0].label, "Model A");
        assert_eq!(report.limits[0].percentage, Some(80.0));
        assert_eq!(report.limits[1].label, "Model B");
        assert_eq!(report.limits[1].percentage, Some(20.0));
    }

    #[test]
    fn test_limits_non_decreasing_in_remaining_fraction() {
        let report = build_report(
            envelope(vec![
                ("m1", model(Some("M1"), Some(0.9))),
                ("m2", model(Some("M2"), Some(0.1))),
                ("m3", model(Some("M3"), Some(0.5))),
                ("m4", model(Some("M4"), None)),
            ]),
            now(),
        )
        .unwrap();

        let remaining: Vec<f64> = report
            .limits
            .iter()
            .map(|l| l.remaining.unwrap())
            .collect();
        assert!(remaining.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_missing_fraction_defaults_to_untouched() {
        let report = build_report(
            envelope(vec![("m", model(Some("M"), None))]),
            now(),
        )
        .unwrap();

        let entry = &report.limits[0];
        assert_eq!(entry.remaining, Some(100.0));
        assert_eq!(entry.percentage, Some(0.0));
        assert_eq!(report.balance, 100.0);
    }

    #[test]
    fn test_filters_models_without_display_name() {
        let err = build_report(
            envelope(vec![
                ("internal-1", model(None, Some(0.5))),
                ("internal-2", model(Some(""), Some(0.5))),
            ]),
            now(),
        )
        .unwrap_err();

        assert!(matches!(err, PluginError::NoData(_)));
        assert!(err.to_string().contains("no valid model plans"));
    }

    #[test]
    fn test_empty_models_map() {
        let err = build_report(envelope(vec![]), now()).unwrap_err();
        assert!(err.to_string().contains("no model data"));
    }

    #[test]
    fn test_balance_is_mean_remaining_percent() {
        let report = build_report(
            envelope(vec![
                ("a", model(Some("A"), Some(0.2))),
                ("b", model(Some("B"), Some(0.8))),
            ]),
            now(),
        )
        .unwrap();

        assert_eq!(report.balance, 50.0);
        assert_eq!(report.currency, "%");
        assert_eq!(report.show_total, Some(false));
    }

    #[test]
    fn test_status_text_includes_reset_phrase() {
        let mut m = model(Some("A"), Some(0.25));
        m.quota_info.as_mut().unwrap().reset_time = Some("2024-06-01T14:30:00Z".to_string());

        let report = build_report(envelope(vec![("a", m)]), now()).unwrap();
        let text = report.limits[0].status_text.as_deref().unwrap();
        assert_eq!(text, "剩余 25% | 2小时30分后重置");
    }

    #[test]
    fn test_reset_phrase_buckets() {
        let base = now();
        assert_eq!(
            format_reset_phrase(base - Duration::minutes(5), base),
            "即将重置"
        );
        assert_eq!(format_reset_phrase(base, base), "即将重置");
        assert_eq!(
            format_reset_phrase(base + Duration::minutes(45), base),
            "45分钟后重置"
        );
        assert_eq!(
            format_reset_phrase(base + Duration::hours(2) + Duration::minutes(30), base),
            "2小时30分后重置"
        );
        assert_eq!(
            format_reset_phrase(base + Duration::hours(30), base),
            "1天后重置"
        );
        // Exactly 24 hours still reads in hours, matching the > 24 cutoff.
        assert_eq!(
            format_reset_phrase(base + Duration::hours(24), base),
            "24小时0分后重置"
        );
    }
}
