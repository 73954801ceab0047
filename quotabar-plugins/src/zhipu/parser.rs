//! Normalization of Zhipu quota-limit data.
//!
//! Maps typed limit entries through a static label/unit lookup and computes
//! a usage percentage per entry.

use quotabar_core::{BalanceReport, LimitEntry, PluginError};

use super::api::{QuotaLimitEnvelope, RawLimit};
use crate::util::parse_datetime;

// ============================================================================
// Limit Type Lookup
// ============================================================================

/// Display label and unit for a limit type code.
///
/// Unknown codes fall through with the raw code as label and a default
/// unit, so new upstream types render instead of erroring.
fn limit_type_display(type_code: &str) -> (String, &'static str) {
    match type_code {
        "TIME_LIMIT" => ("MCP 用量".to_string(), "次"),
        "TOKENS_LIMIT" => ("模型用量".to_string(), "tokens"),
        other => (other.to_string(), "tokens"),
    }
}

// ============================================================================
// Report Assembly
// ============================================================================

/// Builds the normalized report from a parsed envelope.
pub(crate) fn build_report(envelope: QuotaLimitEnvelope) -> Result<BalanceReport, PluginError> {
    if envelope.code != Some(200) || envelope.success != Some(true) {
        return Err(PluginError::Api(envelope.msg.unwrap_or_else(|| {
            format!(
                "API error: {}",
                envelope
                    .code
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string())
            )
        })));
    }

    let raw_limits = envelope.data.unwrap_or_default().limits;
    if raw_limits.is_empty() {
        return Err(PluginError::NoData("no quota limits found".to_string()));
    }

    let limits = raw_limits.iter().map(to_limit_entry).collect();

    // No meaningful aggregate exists for this upstream; the balance field
    // only satisfies the shared contract.
    let mut report = BalanceReport::new(0.0, "CNY", limits);
    report.show_total = Some(false);
    Ok(report)
}

fn to_limit_entry(item: &RawLimit) -> LimitEntry {
    let type_code = item.limit_type.as_deref().unwrap_or("");
    let (label, unit) = limit_type_display(type_code);

    let usage = item.usage.unwrap_or(0.0);
    let current = item.current_value.unwrap_or(0.0);
    let percentage = if usage > 0.0 {
        (current / usage * 100.0).round()
    } else {
        0.0
    };

    LimitEntry {
        limit_type: type_code.to_string(),
        label,
        unit: unit.to_string(),
        usage: Some(usage),
        current_value: Some(current),
        remaining: Some(item.remaining.unwrap_or(0.0)),
        percentage: Some(percentage),
        next_reset_time: item.next_reset_time.as_deref().and_then(parse_datetime),
        ..LimitEntry::default()
    }
}

// ============================================================================
// Tests
// ============================================================================
