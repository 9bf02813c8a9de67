//! Error shape returned by the REST query layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed remote call.
///
/// Mirrors the JSON error body of the query layer (`code`, `message`,
/// `details`, `hint`). `status` is the HTTP status when one was received;
/// transport failures carry `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RemoteError {
    #[serde(skip)]
    pub status: Option<u16>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Build from a non-success response body. Bodies that are not the
    /// expected JSON shape become the message verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Self>(body)
            .ok()
            .filter(|e| !e.message.is_empty() || e.code.is_some());
        let mut error = parsed.unwrap_or_else(|| Self::new(body.trim()));
        if error.message.is_empty() {
            error.message = format!("HTTP {status}");
        }
        error.status = Some(status);
        error
    }

    pub(crate) fn transport(error: &reqwest::Error) -> Self {
        let mut remote = Self::new(error.to_string());
        remote.status = error.status().map(|s| s.as_u16());
        remote
    }

    /// Message, details and hint joined for pattern matching.
    pub fn full_text(&self) -> String {
        [Some(self.message.as_str()), self.details.as_deref(), self.hint.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_query_layer_body() {
        let body = r#"{"code":"PGRST200","details":"Searched for a foreign key relationship","hint":null,"message":"Could not find a relationship between 'job_parts' and 'vendors' in the schema cache"}"#;
        let error = RemoteError::from_response(400, body);
        assert_eq!(error.status, Some(400));
        assert_eq!(error.code.as_deref(), Some("PGRST200"));
        assert!(error.message.starts_with("Could not find a relationship"));
        assert_eq!(error.hint, None);
    }

    #[test]
    fn raw_body_becomes_message() {
        let error = RemoteError::from_response(502, "Bad Gateway\n");
        assert_eq!(error.message, "Bad Gateway");
        assert_eq!(error.code, None);
    }

    #[test]
    fn empty_body_reports_status() {
        let error = RemoteError::from_response(503, "");
        assert_eq!(error.message, "HTTP 503");
    }

    #[test]
    fn display_is_the_message() {
        let error = RemoteError::new("permission denied for table users").with_code("42501");
        assert_eq!(error.to_string(), "permission denied for table users");
    }

    #[test]
    fn full_text_skips_missing_parts() {
        let error = RemoteError::new("column \"x\" does not exist").with_details("");
        assert_eq!(error.full_text(), "column \"x\" does not exist");
        let error = RemoteError::new("a").with_details("b");
        assert_eq!(error.full_text(), "a b");
    }
}
