// crates/catre-client/src/auth.rs
// ============================================================================
// Module: Password Hash Chain
// Description: Client-side hashing for the CATRE login protocol.
// Purpose: Reproduce the server's two-round salted hash chain exactly.
// Dependencies: sha2, base64
// ============================================================================

//! ## Overview
//! The CATRE server never sees a plaintext password. Clients submit
//! `hash(hash(password) + username)` on registration and, on login,
//! `hash(stored + salt)` for the salt issued by the current `GET /login`
//! exchange. `hash` is SHA-512 with standard base64 encoding. The chain is
//! deterministic: a `(username, password, salt)` triple always reproduces
//! the same salted value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::Digest;
use sha2::Sha512;

// ============================================================================
// SECTION: Hashing
// ============================================================================

/// Hashes a string with SHA-512 and encodes the digest as standard base64.
///
/// This is the primitive every step of the login chain is built from; the
/// output alphabet and padding must match the server byte for byte.
#[must_use]
pub fn secure_hash(input: &str) -> String {
    let digest = Sha512::digest(input.as_bytes());
    STANDARD.encode(digest)
}

/// Pre-salt password digest for a specific user.
///
/// # Invariants
/// - Holds `secure_hash(secure_hash(password) + username)`, the value the
///   server stores and the value submitted on `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Derives the stored digest from a username and plaintext password.
    #[must_use]
    pub fn derive(username: &str, password: &str) -> Self {
        let inner = secure_hash(password);
        Self(secure_hash(&format!("{inner}{username}")))
    }

    /// Wraps an already-derived stored digest.
    #[must_use]
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Returns the stored (pre-salt) digest string.
    #[must_use]
    pub fn stored(&self) -> &str {
        &self.0
    }

    /// Computes the per-attempt login digest for a server-issued salt.
    #[must_use]
    pub fn salted(&self, salt: &str) -> String {
        secure_hash(&format!("{}{salt}", self.0))
    }
}
