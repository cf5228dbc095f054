pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` of an output envelope, or the value itself.
fn primary(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Plain-text rendering of a cell; `null` becomes `missing`.
fn cell_text(value: &Value, missing: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => missing.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Column headers for an array of row objects, in first-row order.
fn row_headers(rows: &[Value]) -> Option<Vec<String>> {
    match rows.first() {
        Some(Value::Object(first)) => Some(first.keys().cloned().collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_unwraps_envelope() {
        let envelope = json!({ "result": { "repaymentPerPeriod": 1.5 }, "warnings": [] });
        assert_eq!(primary(&envelope), &json!({ "repaymentPerPeriod": 1.5 }));
        let rows = json!([{ "kind": "term" }]);
        assert_eq!(primary(&rows), &rows);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("Monthly"), ""), "Monthly");
        assert_eq!(cell_text(&json!(12), ""), "12");
        assert_eq!(cell_text(&Value::Null, "-"), "-");
    }
}
