//! Cross-cutting error types for Bayline.
//!
//! Domain-specific errors (`RemoteError`, `AuthError`, `DatabaseError`) live in
//! their own crates and map onto [`ErrorKind`](crate::enums::ErrorKind).
//! `anyhow` only appears at the binary boundary.

use thiserror::Error;

use crate::enums::ErrorKind;

/// Errors that can be raised by any Bayline crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Missing or malformed identifiers and parameters, caught before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } | Self::Other(_) => ErrorKind::Generic,
        }
    }
}
