// system-tests/src/scenario.rs
// ============================================================================
// Module: Scripted Scenarios
// Description: Account and bridge flows shared by suites and catre-setup.
// Purpose: Thread session tokens and salts through multi-call scripts.
// Dependencies: catre-client, tracing
// ============================================================================

//! ## Overview
//! Scripted scenarios are straight-line request sequences: each call takes
//! the session token from the previous reply and passes it unchanged to the
//! next. Login follows the server's challenge protocol — fetch a salt with
//! `GET /login`, submit `hash(stored + salt)` with `POST /login` — and
//! falls back to registration when the account does not exist yet.

// ============================================================================
// SECTION: Imports
// ============================================================================

use catre_client::BridgeRequest;
use catre_client::CatreClient;
use catre_client::CredentialBundle;
use catre_client::RegisterRequest;
use catre_client::SessionToken;

// ============================================================================
// SECTION: Account Scenario
// ============================================================================

/// Logs the credential bundle's account in, registering it when the login
/// is rejected.
///
/// Mirrors the bootstrap flow: `GET /login` for a session and salt, salted
/// `POST /login`, and a `POST /register` fallback carrying the rejected
/// session.
///
/// # Errors
///
/// Returns an error on any transport failure, a reply without the fields
/// the next step needs, or a registration fallback that is itself rejected.
pub async fn ensure_account(
    client: &CatreClient,
    bundle: &CredentialBundle,
    universe: &str,
) -> Result<SessionToken, String> {
    let challenge = client.prelogin().await.map_err(|err| err.to_string())?;
    let session = challenge.require_session().map_err(|err| err.to_string())?;
    let salt = challenge.require_salt().map_err(|err| err.to_string())?;

    let digest = bundle.password_digest();
    let login = client
        .login(&session, &salt, &bundle.user, &digest.salted(&salt))
        .await
        .map_err(|err| err.to_string())?;
    if login.is_ok() {
        tracing::info!(user = %bundle.user, "logged in");
        return login.require_session().map_err(|err| err.to_string());
    }

    // Unknown account: register it under the session the server just echoed.
    let session = login.require_session().map_err(|err| err.to_string())?;
    let request = RegisterRequest::new(&bundle.user, &bundle.email, &digest, universe)
        .with_session(session);
    let registered = client.register(&request).await.map_err(|err| err.to_string())?;
    if !registered.is_ok() {
        return Err(format!(
            "register fallback for {} failed: {}",
            bundle.user,
            registered.message().unwrap_or(registered.status())
        ));
    }
    tracing::info!(user = %bundle.user, "registered new account");
    registered.require_session().map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Bridge Scenario
// ============================================================================

/// Registers every configured bridge integration for the session's user.
///
/// Bridges are added in the bootstrap order (generic, iqsign, gcal,
/// samsung). A rejected bridge is logged and skipped rather than aborting
/// the remaining integrations; the session token is re-threaded from each
/// reply that carries one.
///
/// # Errors
///
/// Returns an error on transport failure.
pub async fn register_bridges(
    client: &CatreClient,
    session: SessionToken,
    bundle: &CredentialBundle,
) -> Result<SessionToken, String> {
    let requests = [
        BridgeRequest::generic(&bundle.generic_uid, &bundle.generic_pat),
        BridgeRequest::iqsign(&bundle.iqsign_user, &bundle.iqsign_token),
        BridgeRequest::gcal(&bundle.gcal_names),
        BridgeRequest::samsung(&bundle.smartthings_token),
    ];

    let mut session = session;
    for request in requests {
        let bridge = request.bridge().to_string();
        let reply = client.add_bridge(&session, &request).await.map_err(|err| err.to_string())?;
        if reply.is_ok() {
            tracing::info!(%bridge, "bridge added");
        } else {
            tracing::warn!(
                %bridge,
                status = reply.status(),
                message = reply.message().unwrap_or_default(),
                "bridge add rejected"
            );
        }
        if let Some(next) = reply.session() {
            session = next.clone();
        }
    }
    Ok(session)
}
