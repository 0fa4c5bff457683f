pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Render a computation envelope on stdout in the requested format.
pub fn render(format: &OutputFormat, envelope: &Value) {
    match format {
        OutputFormat::Json => {
            if let Err(e) = json::print_json(envelope) {
                tracing::error!(error = %e, "failed to write JSON output");
            }
        }
        OutputFormat::Table => table::print_table(envelope),
        OutputFormat::Csv => csv_out::print_csv(envelope),
        OutputFormat::Minimal => minimal::print_minimal(envelope),
    }
}

/// The `result` object of a computation envelope, if present.
pub(crate) fn result_section(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    value.get("result").and_then(Value::as_object)
}

/// Render a scalar JSON value as plain text.
pub(crate) fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
