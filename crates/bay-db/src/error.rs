//! Database error types for bay-db.

use bay_auth::is_access_denied;
use bay_core::enums::ErrorKind;
use bay_core::errors::CoreError;
use bay_remote::RemoteError;
use thiserror::Error;

use crate::classify::{QueryLayerClassifier, SchemaClassifier};

/// Errors from orchestrated reads and writes.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Missing or malformed input, rejected before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote store rejected the call.
    #[error("{0}")]
    Remote(#[from] RemoteError),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A returned row did not match the expected shape.
    #[error("Failed to decode {entity}: {reason}")]
    Decode { entity: &'static str, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Caller-facing classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Remote(error) if is_access_denied(error) => ErrorKind::AccessDenied,
            Self::Remote(error) => QueryLayerClassifier.classify(error).into(),
            Self::NoResult | Self::Decode { .. } | Self::Other(_) => ErrorKind::Generic,
        }
    }

    /// The underlying remote error, if any.
    #[must_use]
    pub const fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(error) => Some(error),
            _ => None,
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            CoreError::NotFound { .. } => Self::NoResult,
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
