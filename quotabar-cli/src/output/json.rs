//! JSON output formatting.

use anyhow::Result;
use quotabar_core::BalanceReport;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single plugin fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginReportOutput {
    /// Plugin id.
    pub plugin: String,
    /// Normalized report on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BalanceReport>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginReportOutput {
    /// Wraps a successful fetch.
    pub fn success(plugin: impl Into<String>, report: BalanceReport) -> Self {
        Self {
            plugin: plugin.into(),
            report: Some(report),
            error: None,
        }
    }

    /// Wraps a failed fetch.
    pub fn failure(plugin: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            report: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats fetch results; a single result is printed unwrapped.
    pub fn format_results(&self, results: &[PluginReportOutput]) -> Result<String> {
        if results.len() == 1 {
            self.format(&results[0])
        } else {
            self.format(&results)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_failure_output_shape() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format(&PluginReportOutput::failure("zhipu-balance", "HTTP 500"))
            .unwrap();
        assert!(output.contains(r#""plugin":"zhipu-balance""#));
        assert!(output.contains(r#""error":"HTTP 500""#));
        assert!(!output.contains("report"));
    }

    #[test]
    fn test_single_result_unwrapped() {
        let formatter = JsonFormatter::new(false);
        let results = vec![PluginReportOutput::failure("antigravity", "boom")];
        let output = formatter.format_results(&results).unwrap();
        assert!(output.starts_with('{'));
    }
}
