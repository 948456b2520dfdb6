//! Versioned snapshot envelope.
//!
//! Each collection is persisted as
//!
//! ```json
//! {"schemaVersion": 1, "collection": "products", "records": [ ... ]}
//! ```
//!
//! A bare JSON array is the unversioned layout written before the envelope
//! existed. It is read as schema version 0 and rewritten on the next save.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Version assigned to bare-array snapshots.
pub const LEGACY_SCHEMA_VERSION: u32 = 0;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, T> {
    schema_version: u32,
    collection: &'a str,
    records: &'a [T],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeHeader {
    schema_version: u32,
    #[serde(default)]
    collection: Option<String>,
    #[serde(default)]
    records: Value,
}

/// Records decoded from a snapshot.
#[derive(Debug)]
pub struct Decoded<T> {
    /// The records, in persisted order.
    pub records: Vec<T>,
    /// Version the snapshot was written with.
    pub schema_version: u32,
}

impl<T> Decoded<T> {
    /// True when the snapshot predates the current schema and should be rewritten.
    #[must_use]
    pub fn needs_migration(&self) -> bool {
        self.schema_version < SCHEMA_VERSION
    }
}

/// Serialize `records` into the current envelope.
pub fn encode<T: Serialize>(collection: Collection, records: &[T]) -> StoreResult<String> {
    let envelope = EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        collection: collection.name(),
        records,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a snapshot stored under `key`.
///
/// # Errors
/// - `CorruptSnapshot` for malformed JSON, wrong record shapes, or an envelope
///   naming another collection
/// - `UnsupportedSchemaVersion` for envelopes newer than [`SCHEMA_VERSION`]
pub fn decode<T: DeserializeOwned>(
    collection: Collection,
    key: &str,
    raw: &str,
) -> StoreResult<Decoded<T>> {
    let corrupt = |message: String| StoreError::CorruptSnapshot {
        key: key.to_string(),
        message,
    };

    let value: Value = serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;

    let (records, schema_version) = match value {
        Value::Array(_) => (value, LEGACY_SCHEMA_VERSION),
        Value::Object(_) => {
            let header: EnvelopeHeader =
                serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))?;
            if header.schema_version > SCHEMA_VERSION {
                return Err(StoreError::UnsupportedSchemaVersion {
                    key: key.to_string(),
                    found: header.schema_version,
                    supported: SCHEMA_VERSION,
                });
            }
            if let Some(name) = header.collection.as_deref() {
                if name != collection.name() {
                    return Err(corrupt(format!(
                        "envelope belongs to collection '{name}', expected '{collection}'"
                    )));
                }
            }
            (header.records, header.schema_version)
        }
        other => {
            return Err(corrupt(format!(
                "expected an envelope object or record array, found {}",
                json_kind(&other)
            )))
        }
    };

    let records: Vec<T> = serde_json::from_value(records).map_err(|e| corrupt(e.to_string()))?;
    Ok(Decoded {
        records,
        schema_version,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
