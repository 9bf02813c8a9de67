//! Capability-gated reads with a single reduced-projection retry.
//!
//! A read is a base column list plus optional features, each gated by a
//! [`Capability`]. Features whose capability is degraded are left out before
//! the first attempt. A `MISSING_FK` / `MISSING_COLUMN` failure degrades the
//! offending features and retries once without them. A retry that still hits
//! missing schema is absorbed into an empty result; anything else propagates.

use bay_core::enums::{Capability, SchemaErrorKind, TelemetryKey};
use bay_remote::{RemoteError, SelectQuery};
use bay_session::logger::category;
use serde_json::{Value, json};

use crate::error::DatabaseError;
use crate::service::BayService;

/// An optional part of a read projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalFeature {
    pub capability: Capability,
    /// Projection fragment appended to the base columns.
    pub fragment: String,
    /// Columns this feature adds. Empty for relationship embeds.
    pub columns: &'static [&'static str],
}

impl OptionalFeature {
    /// A relationship embed, e.g. `vendor:vendors(id,name)`.
    pub fn relationship(capability: Capability, fragment: impl Into<String>) -> Self {
        Self {
            capability,
            fragment: fragment.into(),
            columns: &[],
        }
    }

    /// Extra plain columns.
    #[must_use]
    pub fn columns(capability: Capability, columns: &'static [&'static str]) -> Self {
        Self {
            capability,
            fragment: columns.join(","),
            columns,
        }
    }

    const fn is_relationship(&self) -> bool {
        self.columns.is_empty()
    }
}

fn projection(base: &str, features: &[&OptionalFeature]) -> String {
    std::iter::once(base)
        .chain(features.iter().map(|f| f.fragment.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}

impl BayService {
    /// Run `query` with `base` columns plus every usable feature.
    ///
    /// `operation` names the call in logs.
    pub(crate) async fn select_resilient(
        &self,
        operation: &str,
        query: SelectQuery,
        base: &str,
        features: &[OptionalFeature],
    ) -> Result<Vec<Value>, DatabaseError> {
        let capabilities = self.diagnostics().capabilities();
        let included: Vec<&OptionalFeature> = features
            .iter()
            .filter(|f| capabilities.get(f.capability).should_attempt())
            .collect();
        let skipped = features.len() - included.len();
        if skipped > 0 {
            tracing::debug!(operation, skipped, "omitting degraded features");
        }

        let attempt = query.clone().select(projection(base, &included));
        let error = match self.store().select(&attempt).await {
            Ok(rows) => {
                self.confirm(&included);
                return Ok(rows);
            }
            Err(error) => error,
        };

        let kind = self.classifier().classify(&error);
        if !kind.is_missing_schema() {
            tracing::debug!(operation, %kind, error = %error, "read failed");
            return Err(error.into());
        }

        let degraded = self.offending_features(kind, &error, &included);
        if degraded.is_empty() {
            // Nothing left to drop; a retry would send the same projection.
            return Ok(self.absorb(operation, kind, &error));
        }
        for feature in &degraded {
            self.diagnostics()
                .record_fallback(feature.capability, kind, &error.message);
        }

        let remaining: Vec<&OptionalFeature> = included
            .into_iter()
            .filter(|f| !degraded.contains(f))
            .collect();
        let retry = query.select(projection(base, &remaining));
        match self.store().select(&retry).await {
            Ok(rows) => {
                self.confirm(&remaining);
                Ok(rows)
            }
            Err(retry_error) => {
                let retry_kind = self.classifier().classify(&retry_error);
                if retry_kind.is_missing_schema() {
                    Ok(self.absorb(operation, retry_kind, &retry_error))
                } else {
                    Err(retry_error.into())
                }
            }
        }
    }

    /// Features of `included` that `error` implicates.
    fn offending_features<'a>(
        &self,
        kind: SchemaErrorKind,
        error: &RemoteError,
        included: &[&'a OptionalFeature],
    ) -> Vec<&'a OptionalFeature> {
        match kind {
            SchemaErrorKind::MissingFk => included
                .iter()
                .copied()
                .filter(|f| f.is_relationship())
                .collect(),
            SchemaErrorKind::MissingColumn => {
                let column_features = included.iter().copied().filter(|f| !f.is_relationship());
                match self.classifier().missing_column(error) {
                    Some(name) => {
                        let named: Vec<_> = column_features
                            .clone()
                            .filter(|f| f.columns.contains(&name.as_str()))
                            .collect();
                        if named.is_empty() {
                            column_features.collect()
                        } else {
                            named
                        }
                    }
                    None => column_features.collect(),
                }
            }
            SchemaErrorKind::StaleCache | SchemaErrorKind::Generic => Vec::new(),
        }
    }

    fn confirm(&self, features: &[&OptionalFeature]) {
        for feature in features {
            self.diagnostics()
                .capabilities()
                .set(feature.capability, true);
        }
    }

    fn absorb(&self, operation: &str, kind: SchemaErrorKind, error: &RemoteError) -> Vec<Value> {
        self.diagnostics()
            .telemetry()
            .increment(TelemetryKey::DegradedEmptyResult);
        self.diagnostics().logger().warn(
            category::READ_PATH,
            "degraded read returned no rows",
            json!({
                "operation": operation,
                "classification": kind.as_str(),
                "detail": error.message,
            }),
        );
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn projection_joins_fragments() {
        let vendor = OptionalFeature::relationship(
            Capability::JobPartsVendorRel,
            "vendor:vendors(id,name)",
        );
        let times = OptionalFeature::columns(
            Capability::JobPartsScheduledTimes,
            &["scheduled_start_time", "scheduled_end_time"],
        );
        assert_eq!(
            projection("id,job_id", &[&vendor, &times]),
            "id,job_id,vendor:vendors(id,name),scheduled_start_time,scheduled_end_time"
        );
        assert_eq!(projection("id", &[]), "id");
        assert!(vendor.is_relationship());
        assert!(!times.is_relationship());
    }
}
