use serde_json::Value;

use super::{cell_text, primary};

/// Result fields in the order a one-line answer should prefer them.
const ANSWER_KEYS: [&str; 4] = [
    "repayment_per_period",
    "repaymentPerPeriod",
    "repayment_total",
    "repaymentTotal",
];

/// Print just the repayment figure, or the first field when there is none.
pub fn print_minimal(value: &Value) {
    match primary(value) {
        Value::Object(map) => {
            let answer = ANSWER_KEYS
                .iter()
                .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
            match answer {
                Some(val) => println!("{}", cell_text(val, "null")),
                None => {
                    if let Some((key, val)) = map.iter().next() {
                        println!("{}: {}", key, cell_text(val, "null"));
                    }
                }
            }
        }
        Value::Array(rows) => {
            for row in rows {
                let label = row.get("label").unwrap_or(row);
                println!("{}", cell_text(label, "null"));
            }
        }
        other => println!("{}", cell_text(other, "null")),
    }
}
