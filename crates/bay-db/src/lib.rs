//! # bay-db
//!
//! Capability-aware resilient data access for Bayline.
//!
//! Every tenant-scoped read and write against the remote store goes through
//! [`BayService`]. When the store's cached schema lags behind migrations,
//! reads degrade to a reduced projection instead of failing and writes retry
//! once without the missing scheduling columns. Each fallback updates the
//! session's capability flags and telemetry and leaves a log entry.

pub mod classify;
pub mod error;
pub mod helpers;
pub mod repos;
pub mod resilient;
pub mod service;
pub mod vendor;

mod test_support;

pub use classify::{QueryLayerClassifier, SchemaClassifier, classify};
pub use error::DatabaseError;
pub use repos::jobs::JobFilter;
pub use service::BayService;
pub use vendor::{VendorSummary, aggregate_vendor};
