// crates/catre-client/src/reply.rs
// ============================================================================
// Module: Server Reply Envelope
// Description: Session tokens and the JSON reply envelope CATRE returns.
// Purpose: Give scripted scenarios typed access to STATUS, token, and salt.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every CATRE response is a JSON object carrying at least a `STATUS` field
//! (`"OK"` on success). Authenticated routes echo an updated `CATRESESSION`
//! token that must be passed unchanged to the next call in the same
//! scenario, and `GET /login` additionally issues a per-attempt `SALT`.
//! Fields beyond the envelope are kept verbatim for callers that need them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::ClientError;

// ============================================================================
// SECTION: Session Token
// ============================================================================

/// Opaque session credential issued by the server.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this
///   type. Its lifetime is the duration of one scripted scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Creates a session token from its wire form.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the wire form of the token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Reply Envelope
// ============================================================================

/// Status value the server uses for successful calls.
pub const STATUS_OK: &str = "OK";

/// Decoded JSON reply from a CATRE endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerReply {
    /// Call outcome; `"OK"` on success.
    #[serde(rename = "STATUS")]
    status: String,
    /// Updated session token, when the route carries one.
    #[serde(rename = "CATRESESSION", default)]
    session: Option<SessionToken>,
    /// Challenge salt, issued by `GET /login`.
    #[serde(rename = "SALT", default)]
    salt: Option<String>,
    /// Server-supplied explanation on error statuses.
    #[serde(rename = "MESSAGE", default)]
    message: Option<String>,
    /// Remaining payload fields, verbatim.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ServerReply {
    /// Returns the raw `STATUS` value.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns true when the call succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Returns the error message, when the server supplied one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the echoed session token, when present.
    #[must_use]
    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    /// Returns the session token or fails the scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] when the reply carried no
    /// `CATRESESSION` value.
    pub fn require_session(&self) -> Result<SessionToken, ClientError> {
        self.session.clone().ok_or(ClientError::MissingField {
            field: "CATRESESSION",
        })
    }

    /// Returns the challenge salt, when present.
    #[must_use]
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    /// Returns the challenge salt or fails the scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] when the reply carried no
    /// `SALT` value or the salt was empty.
    pub fn require_salt(&self) -> Result<String, ClientError> {
        match self.salt.as_deref() {
            Some(salt) if !salt.is_empty() => Ok(salt.to_string()),
            _ => Err(ClientError::MissingField {
                field: "SALT",
            }),
        }
    }

    /// Returns a payload field outside the envelope, verbatim.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}
