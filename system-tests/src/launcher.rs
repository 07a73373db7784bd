// system-tests/src/launcher.rs
// ============================================================================
// Module: Server Launcher
// Description: Background launch and teardown for the server under test.
// Purpose: Provide deterministic server startup for suites and the setup bin.
// Dependencies: catre-client, tokio
// ============================================================================

//! ## Overview
//! The harness hosts exactly one server under test. It either launches the
//! configured command line as a background child process or adopts a server
//! that is already reachable at a configured host. Launching never implies
//! readiness: callers poll [`crate::readiness`] before issuing data calls.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::Stdio;
use std::time::Duration;

use catre_client::CatreClient;
use tokio::process::Child;
use tokio::process::Command;

use crate::config::DEFAULT_HOST;
use crate::config::HarnessConfig;

// ============================================================================
// SECTION: Server Handle
// ============================================================================

/// Handle for the server under test.
pub struct ServerHandle {
    /// Base URL data calls are issued against.
    base_url: String,
    /// Child process, present only when this handle launched the server.
    process: Option<Child>,
}

impl ServerHandle {
    /// Returns the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true when this handle owns a launched child process.
    #[must_use]
    pub fn owns_process(&self) -> bool {
        self.process.is_some()
    }

    /// Builds a client for the server with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed.
    pub fn client(&self, timeout: Duration) -> Result<CatreClient, String> {
        CatreClient::new(&self.base_url, timeout).map_err(|err| err.to_string())
    }

    /// Shuts down the server when this handle launched it.
    ///
    /// Adopted servers are left running; they belong to whoever started
    /// them.
    pub async fn shutdown(mut self) {
        if let Some(mut child) = self.process.take() {
            let _ = child.start_kill();
            let _ = child.wait().await;
        }
    }
}

// Intentionally no Drop impl: the child carries kill_on_drop as a backstop,
// and explicit shutdown keeps teardown ordering visible in scenarios.

// ============================================================================
// SECTION: Launch Functions
// ============================================================================

/// Adopts an already-running server at a base URL.
#[must_use]
pub fn adopt(base_url: impl Into<String>) -> ServerHandle {
    ServerHandle {
        base_url: base_url.into(),
        process: None,
    }
}

/// Launches the server under test from a command line.
///
/// The command line is split on whitespace; the first token is the program.
/// The child is killed when the handle shuts down (or is dropped).
///
/// # Errors
///
/// Returns an error when the command line is empty or the process fails to
/// spawn.
pub fn spawn_server(command_line: &str, base_url: &str) -> Result<ServerHandle, String> {
    let mut tokens = command_line.split_whitespace();
    let program = tokens.next().ok_or_else(|| "server command is empty".to_string())?;
    let child = Command::new(program)
        .args(tokens)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| format!("failed to spawn server command {program}: {err}"))?;
    Ok(ServerHandle {
        base_url: base_url.to_string(),
        process: Some(child),
    })
}

/// Resolves a server handle from harness configuration.
///
/// A configured host without a server command adopts the running server; a
/// configured server command launches it against the configured (or
/// default) host.
///
/// # Errors
///
/// Returns an error when neither a host nor a server command is configured,
/// or when launching fails.
pub fn launch_from_config(config: &HarnessConfig) -> Result<ServerHandle, String> {
    match (&config.server_command, &config.host) {
        (Some(command), host) => {
            spawn_server(command, host.as_deref().unwrap_or(DEFAULT_HOST))
        }
        (None, Some(host)) => Ok(adopt(host.clone())),
        (None, None) => Err(format!(
            "no server configured: set {} or {}",
            crate::config::HarnessEnv::ServerCommand.as_str(),
            crate::config::HarnessEnv::Host.as_str()
        )),
    }
}
