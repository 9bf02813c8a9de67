//! The read path end to end: `RestClient` against an in-process server that
//! lacks the line item → vendor relationship.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use bay_config::{RemoteConfig, TenancyConfig};
use bay_core::enums::{Capability, CapabilityState, TelemetryKey};
use bay_db::BayService;
use bay_remote::RestClient;
use bay_session::Diagnostics;
use pretty_assertions::assert_eq;

const MISSING_FK_BODY: &str = r#"{"code":"PGRST200","details":"Searched for a foreign key relationship between 'job_parts' and 'vendors' in the schema 'public', but no matches were found.","hint":null,"message":"Could not find a relationship between 'job_parts' and 'vendors' in the schema cache"}"#;

const PARTS_BODY: &str = r#"[
    {"id":"p1","job_id":"j1","unit_price":80.0,"quantity_used":1,"is_off_site":true,"vendor_id":"v1"},
    {"id":"p2","job_id":"j1","unit_price":45.5,"quantity_used":2,"is_off_site":false,"vendor_id":null}
]"#;

/// Answer each request with the next scripted `(status, body)`; report URLs.
fn serve(script: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<String>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (status, body) in script {
            let request = server.recv().unwrap();
            tx.send(request.url().to_string()).unwrap();
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                );
            request.respond(response).unwrap();
        }
    });
    (format!("http://127.0.0.1:{port}"), rx)
}

#[tokio::test]
async fn missing_vendor_relationship_degrades_over_http() {
    let (url, urls) = serve(vec![(400, MISSING_FK_BODY), (200, PARTS_BODY)]);
    let client = RestClient::new(&RemoteConfig {
        url,
        anon_key: "anon".into(),
        ..RemoteConfig::default()
    })
    .unwrap();
    let diagnostics = Arc::new(Diagnostics::in_memory());
    let svc = BayService::new(
        Arc::new(client),
        diagnostics.clone(),
        TenancyConfig::default(),
        None,
    );

    let parts = svc.list_job_parts("j1").await.unwrap();

    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|p| p.vendor.is_none()));
    assert_eq!(diagnostics.telemetry().get(TelemetryKey::VendorRelFallback), 1);
    assert_eq!(
        diagnostics.capabilities().get(Capability::JobPartsVendorRel),
        CapabilityState::Degraded
    );

    let first = urls.recv().unwrap();
    let second = urls.recv().unwrap();
    assert!(first.contains("vendor%3Avendors"));
    assert!(!second.contains("vendor%3Avendors"));
    assert!(second.contains("job_id=eq.j1"));
}
