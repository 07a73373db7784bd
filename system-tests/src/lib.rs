// system-tests/src/lib.rs
// ============================================================================
// Module: CATRE Harness Library
// Description: Shared configuration and launch plumbing for the harness.
// Purpose: Provide common utilities for the CATRE system-test binaries.
// Dependencies: catre-client, tokio
// ============================================================================

//! ## Overview
//! This crate hosts the pieces shared between the scripted suites in
//! `system-tests/tests` and the `catre-setup` bootstrap binary: typed
//! environment configuration, the server launcher, the `/ping` readiness
//! poller, and the scripted account/bridge scenarios. The CATRE server
//! itself is external; everything here drives it over HTTP.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod launcher;
pub mod readiness;
pub mod scenario;
