//! Canonical JSON encoding and content hashes for reports.

use intw_core::errors::{ErrorInfo, IntwError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

fn json_error(code: &str, err: serde_json::Error) -> IntwError {
    IntwError::Serde(
        ErrorInfo::new(code, err.to_string())
            .with_context("line", err.line())
            .with_context("column", err.column()),
    )
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            fields.sort_by(|(left, _), (right, _)| left.cmp(right));
            for (_, field) in &mut fields {
                sort_keys(field);
            }
            map.extend(fields);
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// Encodes `value` as compact JSON with object keys sorted at every level.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, IntwError> {
    let mut tree = serde_json::to_value(value).map_err(|err| json_error("json-encode", err))?;
    sort_keys(&mut tree);
    serde_json::to_vec(&tree).map_err(|err| json_error("json-write", err))
}

/// Decodes a report or representation from JSON.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, IntwError> {
    serde_json::from_slice(data).map_err(|err| json_error("json-read", err))
}

/// Lowercase hex SHA-256 of the canonical encoding; equal values hash equally
/// whatever the field order of their maps.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, IntwError> {
    let digest = Sha256::digest(to_canonical_json_bytes(value)?);
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}
