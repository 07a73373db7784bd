// system-tests/src/bin/catre_setup.rs
// ============================================================================
// Module: CATRE Setup Binary
// Description: Bootstrap script that prepares a CATRE account and bridges.
// Purpose: Launch (or target) a server, log in or register, add bridges.
// Dependencies: system-tests, catre-client, clap, tracing
// ============================================================================

//! ## Overview
//! Bootstraps a CATRE installation for a real home: ensures the server is
//! reachable, logs the credential-file account in (registering it on first
//! run), registers the generic, iqsign, gcal, and samsung bridges, then
//! fetches the universe and triggers device discovery. Configuration
//! failures abort immediately with a non-zero exit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use catre_client::CredentialBundle;
use clap::Parser;
use serde_json::Value;
use system_tests::config::HarnessConfig;
use system_tests::launcher;
use system_tests::launcher::ServerHandle;
use system_tests::readiness;
use system_tests::scenario;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Universe name created for first-run registrations.
const UNIVERSE_NAME: &str = "MyWorld";

/// Default locations probed for the credential file.
const DEFAULT_CREDENTIAL_PATHS: [&str; 2] =
    ["/private/iot/secret/catrelogin", "/pro/iot/secret/catrelogin"];

/// Request timeout when no override is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: CLI
// ============================================================================

/// Bootstrap a CATRE server with an account and its bridge integrations.
#[derive(Debug, Parser)]
#[command(name = "catre-setup")]
struct Args {
    /// Target an already-deployed server at this base URL instead of
    /// launching one locally.
    #[arg(long)]
    remote: Option<String>,

    /// Credential file path (overrides configuration and defaults).
    #[arg(long)]
    credentials: Option<PathBuf>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "setup failed");
            ExitCode::FAILURE
        }
    }
}

/// Runs the bootstrap flow end to end.
async fn run(args: Args) -> Result<(), String> {
    let config = HarnessConfig::load()?;

    let bundle = load_credentials(args.credentials.as_deref(), &config)?;

    let server = resolve_server(args.remote, &config)?;
    let client = server.client(config.timeout.unwrap_or(DEFAULT_TIMEOUT))?;
    tracing::info!(base_url = server.base_url(), "waiting for server");
    readiness::wait_for_server_ready_default(&client).await?;

    let session = scenario::ensure_account(&client, &bundle, UNIVERSE_NAME).await?;
    let session = scenario::register_bridges(&client, session, &bundle).await?;

    let universe = client.universe(&session).await.map_err(|err| err.to_string())?;
    tracing::info!(
        status = universe.status(),
        name = field_text(universe.field("NAME")),
        bridges = field_text(universe.field("BRIDGES")),
        "universe"
    );

    let discover = client.discover(&session).await.map_err(|err| err.to_string())?;
    tracing::info!(status = discover.status(), "discovery triggered");

    server.shutdown().await;
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the server handle from the CLI flag or harness configuration.
fn resolve_server(remote: Option<String>, config: &HarnessConfig) -> Result<ServerHandle, String> {
    remote.map_or_else(|| launcher::launch_from_config(config), |url| Ok(launcher::adopt(url)))
}

/// Loads the credential bundle from the first available location.
fn load_credentials(
    override_path: Option<&Path>,
    config: &HarnessConfig,
) -> Result<CredentialBundle, String> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(|| config.credentials.clone())
        .or_else(|| {
            DEFAULT_CREDENTIAL_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
        })
        .ok_or_else(|| "no credential file found; pass --credentials".to_string())?;
    CredentialBundle::load(&path).map_err(|err| err.to_string())
}

/// Renders an optional reply field for logging.
fn field_text(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}
