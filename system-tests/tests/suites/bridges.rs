// system-tests/tests/suites/bridges.rs
// ============================================================================
// Module: Bridge Tests
// Description: Bridge registration coverage against the protocol stub.
// Purpose: Validate bridge bodies, ordering, and session threading.
// Dependencies: system-tests helpers, catre-client
// ============================================================================

//! Bridge registration tests: the four-integration bootstrap order, the
//! `AUTH_*` identifiers each integration carries, and the authorization the
//! server enforces on `POST /bridge/add`.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test suite helpers keep documentation concise."
)]

use std::time::Duration;

use catre_client::BridgeRequest;
use catre_client::CatreClient;
use catre_client::SessionToken;
use helpers::server_stub::CatreStubHandle;
use helpers::server_stub::spawn_catre_stub;
use helpers::server_stub::test_bundle;
use helpers::timeouts::resolve_timeout;
use serde_json::Value;
use system_tests::scenario;

use crate::helpers;

fn stub_client() -> Result<(CatreStubHandle, CatreClient), Box<dyn std::error::Error>> {
    let stub = spawn_catre_stub()?;
    let client = CatreClient::new(stub.base_url(), resolve_timeout(Duration::from_secs(10)))?;
    Ok((stub, client))
}

fn auth_value<'a>(auth: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    auth.get(key).and_then(Value::as_str)
}

#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_registers_four_bridges_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let (stub, client) = stub_client()?;
    let bundle = test_bundle();

    let session = scenario::ensure_account(&client, &bundle, "MyWorld").await?;
    let _session = scenario::register_bridges(&client, session, &bundle).await?;

    let records = stub.bridges();
    let tags: Vec<&str> = records.iter().map(|record| record.bridge.as_str()).collect();
    assert_eq!(tags, ["generic", "iqsign", "gcal", "samsung"]);

    for record in &records {
        assert_eq!(record.user, bundle.user);
    }
    assert_eq!(auth_value(&records[0].auth, "AUTH_UID"), Some(bundle.generic_uid.as_str()));
    assert_eq!(auth_value(&records[0].auth, "AUTH_PAT"), Some(bundle.generic_pat.as_str()));
    assert_eq!(auth_value(&records[1].auth, "AUTH_UID"), Some(bundle.iqsign_user.as_str()));
    assert_eq!(auth_value(&records[1].auth, "AUTH_PAT"), Some(bundle.iqsign_token.as_str()));
    assert_eq!(auth_value(&records[2].auth, "AUTH_CALENDARS"), Some(bundle.gcal_names.as_str()));
    assert_eq!(auth_value(&records[3].auth, "AUTH_TOKEN"), Some(bundle.smartthings_token.as_str()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn bridges_appear_in_universe_description() -> Result<(), Box<dyn std::error::Error>> {
    let (_stub, client) = stub_client()?;
    let bundle = test_bundle();

    let session = scenario::ensure_account(&client, &bundle, "MyWorld").await?;
    let session = scenario::register_bridges(&client, session, &bundle).await?;

    let universe = client.universe(&session).await?;
    assert!(universe.is_ok());
    assert_eq!(universe.field("NAME"), Some(&Value::String("MyWorld".to_string())));
    let bridges = universe
        .field("BRIDGES")
        .and_then(Value::as_array)
        .ok_or("universe reply missing BRIDGES")?;
    assert_eq!(bridges.len(), 4);

    let discover = client.discover(&session).await?;
    assert!(discover.is_ok());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthenticated_bridge_add_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let (stub, client) = stub_client()?;

    let session = SessionToken::new("S_not_a_real_session");
    let request = BridgeRequest::generic("uid", "pat");
    let reply = client.add_bridge(&session, &request).await?;
    assert!(!reply.is_ok());
    assert_eq!(reply.message(), Some("Unauthorized"));
    assert!(stub.bridges().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn custom_bridge_auth_pairs_reach_the_server() -> Result<(), Box<dyn std::error::Error>> {
    let (stub, client) = stub_client()?;
    let bundle = test_bundle();

    let session = scenario::ensure_account(&client, &bundle, "MyWorld").await?;
    let request = BridgeRequest::new("weather").auth("AUTH_UID", "station-7");
    let reply = client.add_bridge(&session, &request).await?;
    assert!(reply.is_ok());

    let records = stub.bridges();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].bridge, "weather");
    assert_eq!(auth_value(&records[0].auth, "AUTH_UID"), Some("station-7"));
    Ok(())
}
