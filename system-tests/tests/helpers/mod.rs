// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for advertisement contract system-tests.
// Purpose: Provide the service stub, run harness, and artifact utilities.
// Dependencies: system-tests, advert-contract-http, advert-contract-runner
// ============================================================================

//! ## Overview
//! Shared helpers for contract system-tests.
//! Invariants:
//! - Runs are seeded so fixture payloads repeat across executions.
//! - The stub serves the advertisement API unless a fault is injected.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod harness;
pub mod service_stub;
