//! Row-to-entity decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DatabaseError;

/// Decode every row into `T`.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` naming `entity` on the first row that does
/// not fit.
pub fn decode_rows<T: DeserializeOwned>(
    rows: Vec<Value>,
    entity: &'static str,
) -> Result<Vec<T>, DatabaseError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| DatabaseError::Decode {
                entity,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Reject blank identifiers before any network call.
///
/// # Errors
///
/// Returns `DatabaseError::Validation` when `value` is empty or whitespace.
pub fn require_id<'a>(value: &'a str, field: &str) -> Result<&'a str, DatabaseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DatabaseError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}
