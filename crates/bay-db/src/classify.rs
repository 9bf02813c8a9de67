//! Schema-drift error classification.
//!
//! Matching is tied to one backend's error wording, so the rules sit behind
//! [`SchemaClassifier`]. [`QueryLayerClassifier`] implements them for the REST
//! query layer; the exact phrases below are a versioned contract with that
//! backend.
//!
//! Priority, first match wins:
//! 1. `MISSING_FK`: an unfindable relationship together with a schema-cache mention
//! 2. `MISSING_COLUMN`: a column-not-found pattern or a missing-field marker
//! 3. `STALE_CACHE`: a schema-cache mention on its own
//! 4. `GENERIC`: everything else, including empty input

use std::sync::LazyLock;

use bay_core::enums::SchemaErrorKind;
use bay_remote::RemoteError;
use regex::Regex;

const RELATIONSHIP_PHRASE: &str = "could not find a relationship";
const SCHEMA_CACHE_PHRASE: &str = "schema cache";

/// Postgres `undefined_column`.
const UNDEFINED_COLUMN_CODE: &str = "42703";
/// Query layer: column missing from the schema cache.
const MISSING_FIELD_CODE: &str = "PGRST204";
/// Query layer: relationship missing from the schema cache.
const MISSING_RELATIONSHIP_CODE: &str = "PGRST200";

static COLUMN_NOT_FOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"column\s+"?([a-z0-9_."]+?)"?\s+(?:of relation\s+"?[a-z0-9_.]+"?\s+)?does not exist"#,
    )
    .expect("column-not-found pattern is valid")
});

static MISSING_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"could not find the '([a-z0-9_]+)' column")
        .expect("missing-field pattern is valid")
});

/// Classify an error message. Pure and total.
#[must_use]
pub fn classify(message: Option<&str>) -> SchemaErrorKind {
    let Some(message) = message.map(str::to_lowercase).filter(|m| !m.trim().is_empty()) else {
        return SchemaErrorKind::Generic;
    };
    if message.contains(RELATIONSHIP_PHRASE) && message.contains(SCHEMA_CACHE_PHRASE) {
        return SchemaErrorKind::MissingFk;
    }
    if COLUMN_NOT_FOUND.is_match(&message) || MISSING_FIELD.is_match(&message) {
        return SchemaErrorKind::MissingColumn;
    }
    if message.contains(SCHEMA_CACHE_PHRASE) {
        return SchemaErrorKind::StaleCache;
    }
    SchemaErrorKind::Generic
}

/// Name of the missing column, without any table qualifier.
#[must_use]
pub fn missing_column_name(message: &str) -> Option<String> {
    let message = message.to_lowercase();
    let captured = COLUMN_NOT_FOUND
        .captures(&message)
        .or_else(|| MISSING_FIELD.captures(&message))?
        .get(1)?
        .as_str()
        .trim_matches('"')
        .to_string();
    let name = captured.rsplit('.').next().unwrap_or(&captured).trim_matches('"');
    (!name.is_empty()).then(|| name.to_string())
}

/// Backend-specific classification rules.
pub trait SchemaClassifier: Send + Sync {
    fn classify(&self, error: &RemoteError) -> SchemaErrorKind;

    fn missing_column(&self, error: &RemoteError) -> Option<String>;
}

/// Rules for the REST query layer: message text first, then error codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryLayerClassifier;

impl SchemaClassifier for QueryLayerClassifier {
    fn classify(&self, error: &RemoteError) -> SchemaErrorKind {
        match classify(Some(&error.full_text())) {
            SchemaErrorKind::Generic | SchemaErrorKind::StaleCache
                if error.code.as_deref() == Some(MISSING_RELATIONSHIP_CODE) =>
            {
                SchemaErrorKind::MissingFk
            }
            SchemaErrorKind::Generic | SchemaErrorKind::StaleCache
                if matches!(
                    error.code.as_deref(),
                    Some(UNDEFINED_COLUMN_CODE | MISSING_FIELD_CODE)
                ) =>
            {
                SchemaErrorKind::MissingColumn
            }
            kind => kind,
        }
    }

    fn missing_column(&self, error: &RemoteError) -> Option<String> {
        missing_column_name(&error.full_text())
    }
}
