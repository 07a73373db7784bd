// crates/catre-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Error types for CATRE client operations.
// Purpose: Surface transport and protocol failures as typed fatal errors.
// Dependencies: thiserror, reqwest, url
// ============================================================================

//! ## Overview
//! Any transport or decode failure during a data call is fatal for the
//! scenario driving it; there is no retry below this layer. Only the
//! readiness probe (which lives in the harness) retries, and it does so by
//! issuing fresh `ping` calls rather than resending a failed one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Errors raised by [`crate::CatreClient`] operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {source}")]
    Build {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },

    /// The request never produced a response.
    #[error("transport failure for {method} {url}: {source}")]
    Transport {
        /// HTTP method of the failed request.
        method: &'static str,
        /// Full request URL.
        url: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },

    /// A route could not be resolved against the base URL.
    #[error("invalid endpoint url for route {route}: {source}")]
    InvalidUrl {
        /// Route that failed to join.
        route: String,
        /// Underlying URL parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The response body was not a decodable JSON reply.
    #[error("invalid json reply from {url}: {source}")]
    Decode {
        /// Full request URL.
        url: String,
        /// Underlying decode failure.
        #[source]
        source: reqwest::Error,
    },

    /// A reply omitted a field the scenario needs to continue.
    #[error("server reply is missing required field {field}")]
    MissingField {
        /// Wire name of the absent field.
        field: &'static str,
    },

    /// The server answered `/ping` with a non-success HTTP status.
    #[error("ping returned http status {status}")]
    PingStatus {
        /// HTTP status code of the probe response.
        status: u16,
    },
}
