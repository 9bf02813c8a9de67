//! # bay-session
//!
//! Session-local state for the resilient data access layer.
//!
//! - [`storage`]: the injectable key/value seam (`KeyValueStore`) with
//!   in-memory, file-backed and unavailable implementations. Every operation is
//!   infallible from the caller's side.
//! - [`capabilities`]: tri-state flags per optional schema feature, stored as
//!   `cap_<name>`.
//! - [`telemetry`]: fallback counters stored as `telemetry_<name>`, with
//!   export/import and mirroring into the durable store.
//! - [`logger`]: bounded ring buffer of structured entries plus a durable
//!   overflow for `error`/`critical` entries.
//! - [`diagnostics`]: the single service owning all of the above.
//!
//! State here is never shared across sessions. Two sessions may hold different
//! beliefs about remote drift; that window is accepted.

pub mod capabilities;
pub mod diagnostics;
pub mod logger;
pub mod storage;
pub mod telemetry;

pub use capabilities::CapabilityFlags;
pub use diagnostics::Diagnostics;
pub use logger::{LogEntry, LogExport, LogFilter, LogStats, StructuredLogger};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SessionStores, UnavailableStore};
pub use telemetry::{Telemetry, TelemetryExport, TelemetrySummary};
