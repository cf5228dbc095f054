use serde_json::Value;
use std::io;

use super::{cell_text, primary, row_headers};

type StdoutCsv = csv::Writer<io::StdoutLock<'static>>;

/// Write output as CSV to stdout. Numbers keep full precision.
pub fn print_csv(value: &Value) {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());

    let written = match primary(value) {
        Value::Object(map) => {
            let mut res = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                res = res.and_then(|()| wtr.write_record([key.as_str(), &cell_text(val, "")]));
            }
            res
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => wtr.write_record([cell_text(other, "")]),
    };

    if let Err(e) = written.and_then(|()| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_rows(wtr: &mut StdoutCsv, rows: &[Value]) -> csv::Result<()> {
    let Some(headers) = row_headers(rows) else {
        for item in rows {
            wtr.write_record([cell_text(item, "")])?;
        }
        return Ok(());
    };

    wtr.write_record(&headers)?;
    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(|v| cell_text(v, "")).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}
