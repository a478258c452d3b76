// system-tests/src/lib.rs
// ============================================================================
// Module: Advert Contract System Tests Library
// Description: Shared configuration for system-test binaries.
// Purpose: Provide common settings for end-to-end contract runs.
// Dependencies: advert-contract-runner
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the system-test binaries in
//! `system-tests/tests`. The binaries run the full contract engine over real
//! HTTP against an in-process stub service, or against an external target
//! when one is configured.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
