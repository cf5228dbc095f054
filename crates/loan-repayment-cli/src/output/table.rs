use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use loan_repayment_core::display::{format_currency, format_percentage};

use super::{cell_text, row_headers};

/// Engine fields rendered as dollars in the display column.
const CURRENCY_FIELDS: [&str; 2] = ["repaymentPerPeriod", "repaymentTotal"];
/// Engine fields rendered as percentages in the display column.
const PERCENT_FIELDS: [&str; 1] = ["interestRate"];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                println!("{}", result_table(result));
                print_notes(map);
            }
            _ => println!("{}", result_table(map)),
        },
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", cell_text(other, "null")),
    }
}

fn result_table(result: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value", "Display"]);
    for (key, val) in result {
        builder.push_record([key.clone(), cell_text(val, "null"), display_text(key, val)]);
    }
    builder.build()
}

/// Borrower-facing rendering of an engine figure; empty for other fields.
fn display_text(key: &str, value: &Value) -> String {
    match value.as_f64() {
        Some(n) if CURRENCY_FIELDS.contains(&key) => format_currency(n),
        Some(n) if PERCENT_FIELDS.contains(&key) => format_percentage(n),
        _ => String::new(),
    }
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(headers) = row_headers(rows) else {
        if rows.is_empty() {
            println!("(empty)");
        }
        for item in rows {
            println!("{}", cell_text(item, ""));
        }
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(|v| cell_text(v, "")).unwrap_or_default()),
        );
    }
    println!("{}", builder.build());
}
