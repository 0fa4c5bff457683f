use serde_json::{Map, Value};
use std::io;

use super::{plain, result_section};

/// Write the growth table as CSV to stdout, one row per period.
///
/// Envelopes without a growth table fall back to `field,value` pairs of the
/// result object.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_section(value) {
        Some(result) => match result.get("growth_table") {
            Some(Value::Array(rows)) => write_rows(&mut wtr, rows),
            _ => write_fields(&mut wtr, result),
        },
        None => match value {
            Value::Object(map) => write_fields(&mut wtr, map),
            other => {
                let _ = wtr.write_record([plain(other)]);
            }
        },
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);

    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(plain).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &plain(val)]);
    }
}
