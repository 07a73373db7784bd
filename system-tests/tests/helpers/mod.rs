// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: Harness Test Helpers
// Description: Shared helpers for CATRE system-tests.
// Purpose: Provide the protocol stub and timeout utilities for suites.
// Dependencies: system-tests, catre-client, axum
// ============================================================================

//! ## Overview
//! Shared helpers for CATRE system-tests. The protocol stub stands in for
//! the external server so the harness's client, readiness, and scenario
//! layers can be exercised without a CATRE deployment.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod timeouts;
