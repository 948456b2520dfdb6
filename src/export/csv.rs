//! CSV rendering.
//!
//! - header: keys of the first record, in its key order
//! - every cell double-quoted; embedded `"` written as `\"`
//! - arrays and objects JSON-encoded before escaping
//! - null and keys missing from later records become an empty cell
//! - rows joined with `\n`, no trailing newline

use serde_json::Value;

use super::{format_number, keys};

fn cell(value: Option<&Value>) -> String {
    let raw = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => format_number(n),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => nested.to_string(),
    };
    format!("\"{}\"", raw.replace('"', "\\\""))
}

/// Render records as CSV. Returns an empty string when there are no records.
#[must_use]
pub fn to_csv(records: &[Value]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers = keys(first);

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));
    for record in records {
        let row: Vec<String> = headers.iter().map(|h| cell(record.get(*h))).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}
