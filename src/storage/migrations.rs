use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::errors::StorageError;

/// Current on-disk schema version for every collection file.
pub const SCHEMA_VERSION: u32 = 1;

/// Versioned wrapper written around a stored collection.
#[derive(Serialize)]
pub struct EnvelopeRef<'a, T> {
    pub version: u32,
    pub items: &'a [T],
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    items: Vec<T>,
}

/// Result of decoding a stored collection.
#[derive(Debug)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    /// Version the data was stored with. `0` is the unversioned legacy format.
    pub stored_version: u32,
}

impl<T> Decoded<T> {
    pub fn needs_rewrite(&self) -> bool {
        self.stored_version != SCHEMA_VERSION
    }
}

pub fn encode<T: Serialize>(items: &[T]) -> Result<String, StorageError> {
    let envelope = EnvelopeRef {
        version: SCHEMA_VERSION,
        items,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Decodes either the current envelope or the legacy bare array.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Decoded<T>, StorageError> {
    let value: Value = serde_json::from_str(raw)?;

    if value.is_array() {
        let items: Vec<T> = serde_json::from_value(value)?;
        return Ok(Decoded {
            items,
            stored_version: 0,
        });
    }

    if let Some(version) = value.get("version").and_then(Value::as_u64) {
        if version > u64::from(SCHEMA_VERSION) {
            return Err(StorageError::unsupported_version(
                u32::try_from(version).unwrap_or(u32::MAX),
                SCHEMA_VERSION,
            ));
        }
    }

    let envelope: Envelope<T> = serde_json::from_value(value)?;
    Ok(Decoded {
        items: envelope.items,
        stored_version: envelope.version,
    })
}
