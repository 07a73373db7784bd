// crates/catre-client/src/lib.rs
// ============================================================================
// Module: CATRE Client Library
// Description: HTTP/JSON client for the CATRE home-automation server.
// Purpose: Drive the external CATRE API surface from harnesses and tools.
// Dependencies: reqwest, serde, sha2, base64
// ============================================================================

//! ## Overview
//! This crate wraps the public HTTP/JSON surface of a CATRE server: the
//! `/ping` liveness probe, the two-phase login exchange, registration,
//! logout, user removal, and bridge management. The server itself is an
//! external collaborator; everything here is request-scoped plumbing that
//! threads session tokens and challenge salts between calls.
//!
//! Authentication follows the server's fixed hash-chaining protocol: the
//! client stores `hash(hash(password) + username)` and, for each login
//! attempt, submits `hash(stored + salt)` for a server-issued salt.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod reply;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use auth::PasswordDigest;
pub use auth::secure_hash;
pub use client::BridgeRequest;
pub use client::CatreClient;
pub use client::RegisterRequest;
pub use credentials::CredentialBundle;
pub use credentials::CredentialsError;
pub use error::ClientError;
pub use reply::ServerReply;
pub use reply::SessionToken;
