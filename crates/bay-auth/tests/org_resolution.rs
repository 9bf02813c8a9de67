//! Org context resolution against a scripted remote store.

use std::sync::Arc;

use bay_auth::OrgContextResolver;
use bay_core::enums::{LogLevel, TelemetryKey};
use bay_core::identity::{OrgContext, Principal};
use bay_remote::RemoteError;
use bay_remote::testing::ScriptedStore;
use bay_session::Diagnostics;
use bay_session::logger::LogFilter;
use pretty_assertions::assert_eq;
use serde_json::json;

const PROFILES: &str = "user_profiles";

fn setup() -> (Arc<ScriptedStore>, Arc<Diagnostics>, OrgContextResolver) {
    let store = Arc::new(ScriptedStore::new());
    let diagnostics = Arc::new(Diagnostics::in_memory());
    let resolver = OrgContextResolver::new(store.clone(), diagnostics.clone(), PROFILES);
    (store, diagnostics, resolver)
}

fn principal() -> Principal {
    Principal::new("u-1", Some("advisor@shop.example".into()))
}

fn warnings(diagnostics: &Diagnostics) -> usize {
    diagnostics
        .logger()
        .get_logs(&LogFilter {
            level: Some(LogLevel::Warn),
            ..LogFilter::default()
        })
        .len()
}

#[tokio::test]
async fn primary_lookup_resolves_directly() {
    let (store, diagnostics, resolver) = setup();
    store.respond_ok(PROFILES, vec![json!({"id": "u-1", "org_id": "org-9"})]);

    let ctx = resolver.resolve(&principal()).await;

    assert_eq!(
        ctx,
        OrgContext {
            org_id: Some("org-9".into()),
            user_id: Some("u-1".into()),
            user_email: Some("advisor@shop.example".into()),
        }
    );
    let calls = store.calls_for(PROFILES);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].eq_value("id"), Some("u-1"));
    assert_eq!(warnings(&diagnostics), 0);
}

#[tokio::test]
async fn denied_primary_recovers_by_email_with_one_warning() {
    let (store, diagnostics, resolver) = setup();
    store
        .respond_err(
            PROFILES,
            RemoteError::new("permission denied for table users").with_code("42501"),
        )
        .respond_ok(PROFILES, vec![json!({"id": "u-1", "org_id": "org-2"})]);

    let ctx = resolver.resolve(&principal()).await;

    assert_eq!(ctx.org_id.as_deref(), Some("org-2"));
    assert_eq!(warnings(&diagnostics), 1);
    assert_eq!(
        diagnostics.telemetry().get(TelemetryKey::OrgContextRecovery),
        1
    );
    assert_eq!(
        diagnostics.telemetry().get(TelemetryKey::OrgContextUnresolved),
        0
    );

    let calls = store.calls_for(PROFILES);
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].eq_value("email"), Some("advisor@shop.example"));
    assert_eq!(calls[1].order, Some(("updated_at".to_string(), true)));
    assert_eq!(calls[1].limit, Some(1));
}

#[tokio::test]
async fn empty_primary_also_falls_back() {
    let (store, _diagnostics, resolver) = setup();
    store
        .respond_ok(PROFILES, vec![])
        .respond_ok(PROFILES, vec![json!({"org_id": "org-3"})]);

    let ctx = resolver.resolve(&principal()).await;
    assert_eq!(ctx.org_id.as_deref(), Some("org-3"));
}

#[tokio::test]
async fn both_lookups_failing_yields_null_org() {
    let (store, diagnostics, resolver) = setup();
    store
        .respond_err(
            PROFILES,
            RemoteError::new("new row violates row-level security policy"),
        )
        .respond_err(PROFILES, RemoteError::new("permission denied").with_status(403));

    let ctx = resolver.resolve(&principal()).await;

    assert_eq!(ctx, OrgContext::unresolved(Some(&principal())));
    assert_eq!(warnings(&diagnostics), 1);
    assert_eq!(
        diagnostics.telemetry().get(TelemetryKey::OrgContextUnresolved),
        1
    );
}

#[tokio::test]
async fn no_email_means_no_secondary_lookup() {
    let (store, _diagnostics, resolver) = setup();
    store.respond_ok(PROFILES, vec![]);

    let ctx = resolver.resolve(&Principal::new("u-1", None)).await;

    assert_eq!(ctx.org_id, None);
    assert_eq!(ctx.user_id.as_deref(), Some("u-1"));
    assert_eq!(store.calls_for(PROFILES).len(), 1);
}

#[tokio::test]
async fn unrelated_primary_failure_is_not_retried() {
    let (store, diagnostics, resolver) = setup();
    store.respond_err(PROFILES, RemoteError::new("connection reset"));

    let ctx = resolver.resolve(&principal()).await;

    assert_eq!(ctx.org_id, None);
    assert_eq!(store.calls_for(PROFILES).len(), 1);
    assert_eq!(warnings(&diagnostics), 1);
}
