use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use corpus_core::format::format_inr;

use super::{plain, result_section};

/// Keys whose values are counts, labels or calendar years rather than money.
const NON_MONEY_KEYS: &[&str] = &[
    "year",
    "month",
    "phase",
    "periodic_investment",
    "duration_years",
    "corpus_end_year",
];

/// Keys holding percentages.
const PERCENT_KEYS: &[&str] = &["rate_of_return", "rate_of_growth", "real_rate"];

/// Print the summary as a field/value table followed by the growth table.
pub fn print_table(value: &Value) {
    let Some(result) = result_section(value) else {
        print_field_table(value.as_object().into_iter().flatten());
        return;
    };

    if let Some(Value::Object(summary)) = result.get("summary") {
        print_field_table(summary.iter());
    }

    if let Some(Value::Array(rows)) = result.get("growth_table") {
        println!();
        print_rows(rows);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table<'a>(fields: impl Iterator<Item = (&'a String, &'a Value)>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &display_cell(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| header_label(h)));

    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(headers.iter().map(|h| cell(row, h)));
    }
    println!("{}", Table::from(builder));
}

fn cell(row: &Map<String, Value>, key: &str) -> String {
    row.get(key).map(|v| display_cell(key, v)).unwrap_or_default()
}

fn display_cell(key: &str, value: &Value) -> String {
    let text = plain(value);
    if NON_MONEY_KEYS.contains(&key) {
        return text;
    }
    match Decimal::from_str(&text) {
        Ok(d) if PERCENT_KEYS.contains(&key) => format!("{}%", d.normalize()),
        Ok(d) => format_inr(d),
        Err(_) => text,
    }
}

fn header_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    for (i, word) in key.split('_').enumerate() {
        if i > 0 {
            label.push(' ');
        }
        let mut chars = word.chars();
        if let Some(c) = chars.next() {
            label.extend(c.to_uppercase());
            label.push_str(chars.as_str());
        }
    }
    label
}
