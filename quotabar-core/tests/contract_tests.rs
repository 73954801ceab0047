//! Integration tests for the serialized balance contract.
//!
//! The host consumes plugin output as camelCase JSON; these tests pin the
//! wire-level key names and the omission of inapplicable fields.

use quotabar_core::{BalanceReport, ConfigCheck, LimitEntry, LimitStatus};

#[test]
fn test_report_wire_keys() {
    let report = BalanceReport::new(40.0, "USD", vec![LimitEntry::default()]);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["dataType"], "balance");
    assert_eq!(json["balance"], 40.0);
    assert_eq!(json["currency"], "USD");
    assert!(json["lastUpdated"].is_string());
    assert!(json["limits"].is_array());
    // Omitted when unset
    assert!(json.get("showTotal").is_none());
}

#[test]
fn test_limit_entry_omits_inapplicable_fields() {
    // A pay-per-use entry: no usage, no percentage, no reset info.
    let entry = LimitEntry {
        limit_type: "PAY_PER_USE".to_string(),
        label: "按量付费".to_string(),
        unit: "$".to_string(),
        remaining: Some(12.3),
        is_pay_per_use: Some(true),
        ..LimitEntry::default()
    };
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["limitType"], "PAY_PER_USE");
    assert_eq!(json["remaining"], 12.3);
    assert_eq!(json["isPayPerUse"], true);
    assert!(json.get("usage").is_none());
    assert!(json.get("percentage").is_none());
    assert!(json.get("nextResetTime").is_none());
    assert!(json.get("resetToday").is_none());
}

#[test]
fn test_limit_status_wire_values() {
    let entry = LimitEntry {
        status: Some(LimitStatus::Warning),
        ..LimitEntry::default()
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["status"], "warning");
}

#[test]
fn test_report_roundtrip() {
    let mut report = BalanceReport::new(3.0, "个有效订阅", vec![]);
    report.show_total = Some(false);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: BalanceReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.balance, 3.0);
    assert_eq!(parsed.currency, "个有效订阅");
    assert_eq!(parsed.show_total, Some(false));
}

#[test]
fn test_config_check_wire_shape() {
    let json = serde_json::to_value(ConfigCheck::ok()).unwrap();
    assert_eq!(json["valid"], true);
    assert!(json.get("message").is_none());

    let json = serde_json::to_value(ConfigCheck::invalid("Token 格式不正确")).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["message"], "Token 格式不正确");
}
