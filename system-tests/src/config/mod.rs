// system-tests/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Centralized configuration for the CATRE harness.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Harness configuration is read from environment variables and mapped into
//! a small typed structure for reuse across suites and the setup binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::DEFAULT_HOST;
pub use env::HarnessConfig;
pub use env::HarnessEnv;
pub use env::read_env_strict;
