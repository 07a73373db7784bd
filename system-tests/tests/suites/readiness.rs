// system-tests/tests/suites/readiness.rs
// ============================================================================
// Module: Readiness Tests
// Description: Launcher and readiness-poll coverage.
// Purpose: Validate the `/ping` budget and server handle lifecycle.
// Dependencies: system-tests helpers, catre-client, tokio
// ============================================================================

//! Launcher and readiness tests: polling a live stub, exhausting the budget
//! against a dead port, and child-process teardown.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test suite helpers keep documentation concise."
)]

use std::time::Duration;

use catre_client::CatreClient;
use helpers::server_stub::allocate_bind_addr;
use helpers::server_stub::spawn_catre_stub;
use helpers::timeouts::resolve_timeout;
use system_tests::launcher;
use system_tests::readiness;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn ready_server_passes_first_probe() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_catre_stub()?;
    let client = CatreClient::new(stub.base_url(), resolve_timeout(Duration::from_secs(10)))?;
    readiness::wait_for_server_ready(&client, 3, Duration::from_millis(50)).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn exhausted_budget_is_a_hard_failure() -> Result<(), Box<dyn std::error::Error>> {
    // Allocate a port and release it: nothing answers there.
    let addr = allocate_bind_addr()?;
    let client =
        CatreClient::new(&format!("http://{addr}"), resolve_timeout(Duration::from_secs(2)))?;

    let result = readiness::wait_for_server_ready(&client, 3, Duration::from_millis(10)).await;
    let error = result.err().ok_or("readiness succeeded against a dead port")?;
    assert!(error.contains("after 3 attempts"), "unexpected error text: {error}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn adopted_server_is_reachable() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_catre_stub()?;
    let server = launcher::adopt(stub.base_url());
    assert!(!server.owns_process());

    let client = server.client(resolve_timeout(Duration::from_secs(10)))?;
    readiness::wait_for_server_ready(&client, 3, Duration::from_millis(50)).await?;
    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn spawned_server_is_killed_on_shutdown() -> Result<(), Box<dyn std::error::Error>> {
    // A stand-in long-running process; the harness never talks to it here.
    let server = launcher::spawn_server("sleep 30", "http://localhost:3334")?;
    assert!(server.owns_process());
    assert_eq!(server.base_url(), "http://localhost:3334");

    // Shutdown must reap the child well before its natural exit.
    let deadline = Duration::from_secs(5);
    tokio::time::timeout(deadline, server.shutdown()).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_server_command_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let error = launcher::spawn_server("   ", "http://localhost:3334")
        .err()
        .ok_or("empty command line was accepted")?;
    assert!(error.contains("server command is empty"), "unexpected error text: {error}");
    Ok(())
}
