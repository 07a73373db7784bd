// crates/catre-client/src/credentials.rs
// ============================================================================
// Module: Credential Bundle
// Description: JSON credential file consumed at harness setup time.
// Purpose: Load account and per-integration secrets with strict validation.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The bootstrap flow reads a local JSON file holding the test account
//! (username, password, email) and the auth identifiers for each bridge
//! integration. A missing or malformed field is a load error; callers abort
//! setup rather than proceed with partial credentials.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::auth::PasswordDigest;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Errors raised while loading a credential file.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The file could not be read.
    #[error("failed to read credential file {path}: {source}")]
    Read {
        /// Path of the credential file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file content was not a valid credential object.
    #[error("malformed credential file {path}: {source}")]
    Parse {
        /// Path of the credential file.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// SECTION: Credential Bundle
// ============================================================================

/// Account and per-integration credentials for one test user.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialBundle {
    /// Account username.
    pub user: String,
    /// Account plaintext password (hashed client-side before any call).
    pub password: String,
    /// Account email address.
    pub email: String,
    /// SmartThings personal access token for the samsung bridge.
    pub smartthings_token: String,
    /// Generic bridge user identifier.
    pub generic_uid: String,
    /// Generic bridge personal access token.
    pub generic_pat: String,
    /// iQsign account name.
    pub iqsign_user: String,
    /// iQsign access token.
    pub iqsign_token: String,
    /// Comma-separated Google Calendar names for the gcal bridge.
    pub gcal_names: String,
}

impl CredentialBundle {
    /// Loads a credential bundle from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, is not valid JSON, or
    /// omits any credential field.
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let raw = fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CredentialsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Derives the pre-salt password digest for this account.
    #[must_use]
    pub fn password_digest(&self) -> PasswordDigest {
        PasswordDigest::derive(&self.user, &self.password)
    }
}
