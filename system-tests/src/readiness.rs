// system-tests/src/readiness.rs
// ============================================================================
// Module: Readiness Poller
// Description: Readiness probing for the server under test.
// Purpose: Block scenarios until `/ping` answers, with a bounded budget.
// Dependencies: catre-client, tokio
// ============================================================================

//! ## Overview
//! A freshly launched server needs time to bind its port; scenarios poll
//! `GET /ping` with a fixed delay between attempts and a bounded attempt
//! budget before the first data call. Exhausting the budget is a hard
//! failure: the poller reports it instead of letting a scenario proceed
//! against a server that never came up.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use catre_client::CatreClient;
use tokio::time::sleep;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default attempt budget for the readiness poll.
pub const DEFAULT_ATTEMPTS: u32 = 100;

/// Default fixed delay between readiness attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// SECTION: Polling
// ============================================================================

/// Polls `/ping` until the server responds or the budget is exhausted.
///
/// The delay is fixed (no exponential backoff); probe failures are not
/// individually surfaced, only the final one.
///
/// # Errors
///
/// Returns an error naming the attempt budget and the last probe failure
/// when the server never becomes ready.
pub async fn wait_for_server_ready(
    client: &CatreClient,
    attempts: u32,
    delay: Duration,
) -> Result<(), String> {
    let mut last_error = "no attempts were made".to_string();
    for attempt in 1..=attempts {
        match client.ping().await {
            Ok(()) => return Ok(()),
            Err(err) => {
                last_error = err.to_string();
                if attempt < attempts {
                    sleep(delay).await;
                }
            }
        }
    }
    Err(format!("server readiness failed after {attempts} attempts: {last_error}"))
}

/// Polls `/ping` with the default budget (100 attempts, 1s apart).
///
/// # Errors
///
/// Returns an error when the server never becomes ready within the budget.
pub async fn wait_for_server_ready_default(client: &CatreClient) -> Result<(), String> {
    wait_for_server_ready(client, DEFAULT_ATTEMPTS, DEFAULT_DELAY).await
}
