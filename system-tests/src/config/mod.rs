// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for contract system tests.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: advert-contract-runner
// ============================================================================

//! ## Overview
//! System-test settings are read from environment variables and turned into
//! runner configurations and artifact directories for the test helpers.

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

pub use env::DEFAULT_ARTIFACT_ROOT;
pub use env::DEFAULT_REQUEST_TIMEOUT;
pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
