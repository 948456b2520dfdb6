//! SQL `INSERT` rendering.
//!
//! Literal rules: strings single-quoted with `'` doubled, null as `NULL`,
//! numbers bare, booleans as `TRUE`/`FALSE`, arrays and objects as a quoted
//! JSON string. Columns come from each record's own keys, so every statement
//! has matching column and value counts.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{format_number, keys};

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => quote(s),
        Value::Array(_) | Value::Object(_) => quote(&value.to_string()),
    }
}

/// Render records as SQL inserts into `table`, preceded by a comment header.
#[must_use]
pub fn to_sql(table: &str, records: &[Value], generated_at: DateTime<Utc>) -> String {
    let mut out = format!(
        "-- Closet Craze export: {table}\n-- Generated: {}\n",
        generated_at.to_rfc3339()
    );
    for record in records {
        let Value::Object(map) = record else {
            continue;
        };
        let columns = keys(record).join(", ");
        let values: Vec<String> = map.values().map(literal).collect();
        out.push_str(&format!(
            "INSERT INTO {table} ({columns}) VALUES ({});\n",
            values.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-16T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_header_only_for_empty() {
        let sql = to_sql("orders", &[], now());
        assert_eq!(
            sql,
            "-- Closet Craze export: orders\n-- Generated: 2026-10-16T09:30:00+00:00\n"
        );
    }

    #[test]
    fn test_literals() {
        let rows = vec![json!({
            "id": "p1",
            "name": "Rock 'n' Roll",
            "price": 500.0,
            "read": false,
            "supplierId": null,
            "tags": ["a", "it's"],
        })];
        let sql = to_sql("products", &rows, now());
        let stmt = sql.lines().last().unwrap();
        assert_eq!(
            stmt,
            "INSERT INTO products (id, name, price, read, supplierId, tags) VALUES \
             ('p1', 'Rock ''n'' Roll', 500, FALSE, NULL, '[\"a\",\"it''s\"]');"
        );
    }

    #[test]
    fn test_one_statement_per_record() {
        let rows = vec![json!({"id": "a"}), json!({"id": "b", "x": 1})];
        let sql = to_sql("users", &rows, now());
        let stmts: Vec<&str> = sql.lines().filter(|l| l.starts_with("INSERT INTO")).collect();
        assert_eq!(stmts.len(), 2);
        assert!(stmts[1].contains("(id, x) VALUES ('b', 1)"));
    }
}
