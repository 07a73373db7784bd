// system-tests/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for the CATRE harness.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid
//! silent misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Base URL used when neither a host nor a server command is configured.
///
/// Matches the CATRE server's default HTTP port.
pub const DEFAULT_HOST: &str = "http://localhost:3334";

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Base URL of an already-running CATRE server.
    Host,
    /// Command line used to launch the server under test.
    ServerCommand,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Path of the JSON credential file.
    Credentials,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "CATRE_SYSTEM_TEST_HOST",
            Self::ServerCommand => "CATRE_SYSTEM_TEST_SERVER_CMD",
            Self::TimeoutSeconds => "CATRE_SYSTEM_TEST_TIMEOUT_SEC",
            Self::Credentials => "CATRE_SYSTEM_TEST_CREDENTIALS",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    /// Base URL of an already-running server.
    pub host: Option<String>,
    /// Command line used to launch the server under test.
    pub server_command: Option<String>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Path of the JSON credential file.
    pub credentials: Option<PathBuf>,
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is
    /// empty, or fails validation (for example, an invalid timeout).
    pub fn load() -> Result<Self, String> {
        let host = read_env_nonempty(HarnessEnv::Host.as_str())?;
        let server_command = read_env_nonempty(HarnessEnv::ServerCommand.as_str())?;
        let timeout = read_env_nonempty(HarnessEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let credentials = read_env_nonempty(HarnessEnv::Credentials.as_str())?.map(PathBuf::from);
        Ok(Self {
            host,
            server_command,
            timeout,
            credentials,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
