//! Capabilities, probe states, telemetry keys, log levels and error kinds.
//!
//! Enums that cross a storage or wire boundary expose `as_str()` returning the
//! exact string used in that contract, and parse back through `FromStr`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// An optional schema feature (relationship or column set) that may be missing
/// from the remote store's cached schema.
///
/// The camelCase name is the storage contract: flags live under `cap_<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Line item → vendor relationship projection.
    JobPartsVendorRel,
    /// `scheduled_start_time` / `scheduled_end_time` columns on line items.
    JobPartsScheduledTimes,
    /// Job → vendor relationship (job-level vendor name).
    JobsVendorRel,
}

impl Capability {
    pub const ALL: [Self; 3] = [
        Self::JobPartsVendorRel,
        Self::JobPartsScheduledTimes,
        Self::JobsVendorRel,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobPartsVendorRel => "jobPartsVendorRel",
            Self::JobPartsScheduledTimes => "jobPartsScheduledTimes",
            Self::JobsVendorRel => "jobsVendorRel",
        }
    }

    /// Namespaced key under which the flag is stored.
    #[must_use]
    pub fn storage_key(self) -> String {
        format!("cap_{}", self.as_str())
    }

    /// Telemetry counter bumped when this capability falls back.
    #[must_use]
    pub const fn fallback_counter(self) -> TelemetryKey {
        match self {
            Self::JobPartsVendorRel => TelemetryKey::VendorRelFallback,
            Self::JobPartsScheduledTimes => TelemetryKey::ScheduledTimesFallback,
            Self::JobsVendorRel => TelemetryKey::JobsVendorRelFallback,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cap| cap.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown capability '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// CapabilityState
// ---------------------------------------------------------------------------

/// Session belief about a capability.
///
/// ```text
/// unknown → confirmed ⇄ degraded
///         → degraded
/// ```
///
/// Only an observed success or a classified drift failure moves the state.
/// A session reset is the only way back to `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityState {
    Unknown,
    Confirmed,
    Degraded,
}

impl CapabilityState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unknown => &[Self::Confirmed, Self::Degraded],
            Self::Confirmed => &[Self::Degraded],
            Self::Degraded => &[Self::Confirmed],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// State after observing the gated path succeed (`true`) or fail with a
    /// drift error (`false`).
    #[must_use]
    pub const fn observe(self, usable: bool) -> Self {
        if usable { Self::Confirmed } else { Self::Degraded }
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        Self::Unknown.observe(value)
    }

    /// `None` while unknown.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Confirmed => Some(true),
            Self::Degraded => Some(false),
        }
    }

    /// Whether callers should still attempt the gated path.
    ///
    /// Unknown is optimistic: the first call probes.
    #[must_use]
    pub const fn should_attempt(self) -> bool {
        !matches!(self, Self::Degraded)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Confirmed => "confirmed",
            Self::Degraded => "degraded",
        }
    }
}

impl fmt::Display for CapabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TelemetryKey
// ---------------------------------------------------------------------------

/// Well-known fallback counters. Stored under `telemetry_<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TelemetryKey {
    VendorRelFallback,
    ScheduledTimesFallback,
    JobsVendorRelFallback,
    ScheduleWriteFallback,
    OrgContextRecovery,
    OrgContextUnresolved,
    DegradedEmptyResult,
}

impl TelemetryKey {
    pub const ALL: [Self; 7] = [
        Self::VendorRelFallback,
        Self::ScheduledTimesFallback,
        Self::JobsVendorRelFallback,
        Self::ScheduleWriteFallback,
        Self::OrgContextRecovery,
        Self::OrgContextUnresolved,
        Self::DegradedEmptyResult,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VendorRelFallback => "vendorRelFallback",
            Self::ScheduledTimesFallback => "scheduledTimesFallback",
            Self::JobsVendorRelFallback => "jobsVendorRelFallback",
            Self::ScheduleWriteFallback => "scheduleWriteFallback",
            Self::OrgContextRecovery => "orgContextRecovery",
            Self::OrgContextUnresolved => "orgContextUnresolved",
            Self::DegradedEmptyResult => "degradedEmptyResult",
        }
    }
}

impl AsRef<str> for TelemetryKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TelemetryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LogLevel
// ---------------------------------------------------------------------------

/// Severity of a structured log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
    ];

    /// `error` and `critical` entries capture a stack and go to the durable overflow.
    #[must_use]
    pub const fn is_severe(self) -> bool {
        matches!(self, Self::Error | Self::Critical)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == lowered)
            .ok_or_else(|| CoreError::Validation(format!("unknown log level '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// SchemaErrorKind
// ---------------------------------------------------------------------------

/// Classification of a remote error with respect to schema drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaErrorKind {
    MissingColumn,
    MissingFk,
    StaleCache,
    Generic,
}

impl SchemaErrorKind {
    /// Drift that a reduced projection can route around.
    #[must_use]
    pub const fn is_missing_schema(self) -> bool {
        matches!(self, Self::MissingColumn | Self::MissingFk)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingColumn => "MISSING_COLUMN",
            Self::MissingFk => "MISSING_FK",
            Self::StaleCache => "STALE_CACHE",
            Self::Generic => "GENERIC",
        }
    }
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Caller-facing error taxonomy shared by every Bayline crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AccessDenied,
    MissingColumn,
    MissingRelationship,
    StaleCache,
    Validation,
    Generic,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessDenied => "access_denied",
            Self::MissingColumn => "missing_column",
            Self::MissingRelationship => "missing_relationship",
            Self::StaleCache => "stale_cache",
            Self::Validation => "validation",
            Self::Generic => "generic",
        }
    }
}

impl From<SchemaErrorKind> for ErrorKind {
    fn from(kind: SchemaErrorKind) -> Self {
        match kind {
            SchemaErrorKind::MissingColumn => Self::MissingColumn,
            SchemaErrorKind::MissingFk => Self::MissingRelationship,
            SchemaErrorKind::StaleCache => Self::StaleCache,
            SchemaErrorKind::Generic => Self::Generic,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
