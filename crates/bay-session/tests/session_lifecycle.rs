//! Cross-module behavior of the session layer over real stores.

use std::sync::Arc;

use bay_config::SessionConfig;
use bay_core::enums::{Capability, CapabilityState, LogLevel, SchemaErrorKind, TelemetryKey};
use bay_session::logger::LogFilter;
use bay_session::{Diagnostics, FileStore, KeyValueStore, MemoryStore, SessionStores};
use serde_json::json;
use tempfile::TempDir;

fn file_backed(dir: &TempDir) -> SessionStores {
    let durable: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(dir.path().join("state.json")).unwrap());
    SessionStores {
        session: Arc::new(MemoryStore::new()),
        durable,
    }
}

#[test]
fn severe_logs_and_counters_outlive_the_session() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig::default();

    let first = Diagnostics::init(file_backed(&dir), &config);
    first.record_fallback(
        Capability::JobPartsVendorRel,
        SchemaErrorKind::MissingFk,
        "relationship missing",
    );
    first
        .logger()
        .error("write_path", "insert rejected", json!({ "job_id": "job-9" }));
    assert_eq!(first.telemetry().persist(), 1);
    drop(first);

    let second = Diagnostics::init(file_backed(&dir), &config);
    // New session: beliefs start over, counters only after restore.
    assert_eq!(
        second.capabilities().get(Capability::JobPartsVendorRel),
        CapabilityState::Unknown
    );
    assert_eq!(second.telemetry().get(TelemetryKey::VendorRelFallback), 0);
    assert_eq!(second.telemetry().restore(), 1);
    assert_eq!(second.telemetry().get(TelemetryKey::VendorRelFallback), 1);

    assert!(second.logger().is_empty());
    let durable = second.logger().durable_logs();
    assert_eq!(durable.len(), 1);
    assert_eq!(durable[0].message, "insert rejected");
}

#[test]
fn configured_capacities_are_honoured() {
    let config = SessionConfig {
        log_capacity: 3,
        durable_log_capacity: 2,
        ..SessionConfig::default()
    };
    let diag = Diagnostics::init(SessionStores::in_memory(), &config);
    for i in 0..5 {
        diag.logger().error("x", &format!("e{i}"), json!(null));
    }
    let logs = diag.logger().get_logs(&LogFilter::default());
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[2].message, "e4");
    assert_eq!(diag.logger().durable_logs().len(), 2);
    assert_eq!(diag.logger().stats().by_level[&LogLevel::Error], 3);
}

#[test]
fn from_config_uses_state_dir() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig {
        state_dir: dir.path().display().to_string(),
        ..SessionConfig::default()
    };
    let stores = SessionStores::from_config(&config);
    assert_eq!(stores.durable.name(), "durable");
    stores.durable.set("k", "v");
    assert!(dir.path().join("state.json").exists());
}

#[test]
fn telemetry_reset_sticks_across_restarts() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig::default();

    let run1 = Diagnostics::init(file_backed(&dir), &config);
    run1.telemetry().restore();
    run1.telemetry().increment(TelemetryKey::VendorRelFallback);
    run1.telemetry().increment(TelemetryKey::VendorRelFallback);
    run1.telemetry().persist();
    drop(run1);

    let run2 = Diagnostics::init(file_backed(&dir), &config);
    assert_eq!(run2.telemetry().restore(), 1);
    run2.telemetry().reset_all();
    run2.telemetry().persist();
    let stamp = run2.telemetry().summary().seconds_since_reset;
    drop(run2);

    let run3 = Diagnostics::init(file_backed(&dir), &config);
    assert_eq!(run3.telemetry().restore(), 0);
    assert_eq!(run3.telemetry().get(TelemetryKey::VendorRelFallback), 0);
    assert!(stamp.is_some());
    assert!(run3.telemetry().summary().seconds_since_reset.is_some());
}
