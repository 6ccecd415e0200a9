// Human-readable rendering of a validation report
use serde_json::Value;
use shared_types::{field, ValidationReport};
use std::fmt::Write;

/// Render the report as numbered violations followed by the enriched data
pub fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    let doc = report
        .data
        .get(field::DOC_NUMBER)
        .map(display_value)
        .unwrap_or_else(|| "(no document number)".to_string());

    if report.valid {
        let _ = writeln!(out, "{doc}: VALID");
    } else {
        let count = report.errors.len();
        let noun = if count == 1 { "violation" } else { "violations" };
        let _ = writeln!(out, "{doc}: INVALID ({count} {noun})");
        for (i, error) in report.errors.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, error);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Enriched data:");
    let width = report.data.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in &report.data {
        let _ = writeln!(out, "  {key:<width$}  {}", display_value(value));
    }
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
