use serde_json::Value;

use super::plain;

/// Headline figure for each engine, in priority order.
const HEADLINE_KEYS: [&str; 3] = ["profit", "return_amount", "final_corpus_after_tax"];

/// Print just the headline figure from the summary.
///
/// Falls back to the first summary field when none of the known headline
/// keys is present.
pub fn print_minimal(value: &Value) {
    match headline(value) {
        Some((None, val)) => println!("{}", plain(val)),
        Some((Some(key), val)) => println!("{}: {}", key, plain(val)),
        None => println!("{}", plain(value)),
    }
}

fn headline(value: &Value) -> Option<(Option<&str>, &Value)> {
    let summary = value
        .get("result")
        .and_then(|r| r.get("summary"))
        .and_then(Value::as_object)?;

    for key in HEADLINE_KEYS {
        if let Some(val) = summary.get(key).filter(|v| !v.is_null()) {
            return Some((None, val));
        }
    }
    summary
        .iter()
        .next()
        .map(|(key, val)| (Some(key.as_str()), val))
}
