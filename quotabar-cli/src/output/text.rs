//! Text output formatting with usage bars.

use quotabar_core::{BalanceReport, LimitEntry, LimitStatus, PluginMetadata};

use super::json::PluginReportOutput;

// Usage bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter.
pub struct TextFormatter {
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new() -> Self {
        Self { bar_width: 10 }
    }

    /// Header line for the plugins listing.
    pub fn format_plugins_header(&self) -> String {
        format!("{:<16} {:<30} {:<8} DESCRIPTION", "ID", "NAME", "VERSION")
    }

    /// One line of the plugins listing.
    pub fn format_plugin_line(&self, metadata: &PluginMetadata) -> String {
        format!(
            "{:<16} {:<30} {:<8} {}",
            metadata.id, metadata.name, metadata.version, metadata.description
        )
    }

    /// Formats one fetch result, success or failure.
    pub fn format_result(&self, output: &PluginReportOutput) -> String {
        match (&output.report, &output.error) {
            (Some(report), _) => self.format_report(&output.plugin, report),
            (None, Some(error)) => format!("{}: error: {error}", output.plugin),
            (None, None) => format!("{}: no data", output.plugin),
        }
    }

    /// Formats a normalized report.
    pub fn format_report(&self, id: &str, report: &BalanceReport) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{id}: balance {} {}", report.balance, report.currency));

        for entry in &report.limits {
            lines.push(self.format_limit(entry));
        }

        lines.join("\n")
    }

    /// Formats a limit entry line.
    fn format_limit(&self, entry: &LimitEntry) -> String {
        let mut line = format!("  {:<24}", entry.label);

        // Percentage-bearing entries get a bar; pay-per-use entries only
        // have a remaining amount.
        if let Some(percent) = entry.percentage.or(entry.usage_percent) {
            line.push_str(&format!(" {} {percent:>5.1}% used", self.usage_bar(percent)));
        } else if let Some(remaining) = entry.remaining {
            line.push_str(&format!(" remaining {remaining} {}", entry.unit));
        }

        if entry.status == Some(LimitStatus::Warning) {
            line.push_str(" [warning]");
        }

        if let Some(text) = &entry.status_text {
            line.push_str(&format!("  {text}"));
        }

        line
    }

    /// Usage bar; over-100 percentages render as a full bar.
    fn usage_bar(&self, used_percent: f64) -> String {
        let width = self.bar_width as f64;
        let filled = ((used_percent / 100.0) * width).round().clamp(0.0, width) as usize;

        let mut bar = String::with_capacity(self.bar_width);
        for _ in 0..filled {
            bar.push(BAR_FULL);
        }
        for _ in filled..self.bar_width {
            bar.push(BAR_EMPTY);
        }
        bar
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_bar() {
        let formatter = TextFormatter::new();
        assert_eq!(formatter.usage_bar(0.0), "░░░░░░░░░░");
        assert_eq!(formatter.usage_bar(50.0), "█████░░░░░");
        assert_eq!(formatter.usage_bar(100.0), "██████████");
        // Over-limit stays within the bar
        assert_eq!(formatter.usage_bar(130.0), "██████████");
    }

    #[test]
    fn test_format_report_lines() {
        let formatter = TextFormatter::new();
        let report = BalanceReport::new(
            40.0,
            "USD",
            vec![LimitEntry {
                label: "PRO".to_string(),
                unit: "$".to_string(),
                percentage: Some(60.0),
                status_text: Some("剩余 30 天 | 可重置 (1/2)".to_string()),
                ..LimitEntry::default()
            }],
        );

        let text = formatter.format_report("88code-balance", &report);
        assert!(text.contains("88code-balance: balance 40 USD"));
        assert!(text.contains("PRO"));
        assert!(text.contains("60.0% used"));
        assert!(text.contains("可重置 (1/2)"));
    }

    #[test]
    fn test_format_pay_per_use_without_bar() {
        let formatter = TextFormatter::new();
        let entry = LimitEntry {
            label: "按量付费".to_string(),
            unit: "$".to_string(),
            remaining: Some(12.34),
            is_pay_per_use: Some(true),
            ..LimitEntry::default()
        };

        let line = formatter.format_limit(&entry);
        assert!(line.contains("remaining 12.34 $"));
        assert!(!line.contains('█'));
    }

    #[test]
    fn test_format_failure() {
        let formatter = TextFormatter::new();
        let line = formatter.format_result(&PluginReportOutput::failure("right-code", "HTTP 500"));
        assert_eq!(line, "right-code: error: HTTP 500");
    }
}
