//! CSV and SQL export of collections, and handing files to a download sink.
//!
//! Export works on the JSON form of records (`serde_json::Value` objects in
//! struct field order), so any collection can be exported without per-kind
//! code. Exports are read-only and never touch the store's state.

mod csv;
mod download;
mod sql;

pub use self::csv::to_csv;
pub use self::download::{
    sanitize_file_name, trigger_download, DirectorySink, DownloadSink, MemorySink, SavedFile,
};
pub use self::sql::to_sql;

use chrono::NaiveDate;
use serde_json::{Number, Value};

use crate::collection::Collection;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// `INSERT` statements.
    Sql,
}

impl ExportFormat {
    /// MIME type handed to the download sink.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Sql => "application/sql",
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Sql => "sql",
        }
    }
}

/// Conventional file name for an export, e.g. `closet_craze_orders_2026-10-16.csv`.
#[must_use]
pub fn export_file_name(collection: Collection, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "closet_craze_{}_{}.{}",
        collection.name(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render a JSON number the way a browser's default string conversion does:
/// integral floats lose their fractional part (`500.0` → `500`).
pub(crate) fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            #[allow(clippy::cast_possible_truncation)]
            let whole = f as i64;
            whole.to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Keys of a record in their serialized order; empty for non-objects.
pub(crate) fn keys(record: &Value) -> Vec<&str> {
    match record {
        Value::Object(map) => map.keys().map(String::as_str).collect(),
        _ => Vec::new(),
    }
}
