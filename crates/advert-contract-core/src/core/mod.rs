// crates/advert-contract-core/src/core/mod.rs
// ============================================================================
// Module: Advertisement Core Types
// Description: Identifiers, entities, and fixtures for the advertisement API.
// Purpose: Provide the data model shared by the contract, transport, and runner.
// Dependencies: rand, serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe the advertisement resource as it crosses the wire and
//! the seedable generator that produces request payloads for scenarios.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod advertisement;
pub mod fixtures;
pub mod identifiers;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use advertisement::Advertisement;
pub use advertisement::CreateAdvertisement;
pub use advertisement::STATISTICS_FIELDS;
pub use advertisement::Statistics;
pub use fixtures::FixtureGenerator;
pub use identifiers::AdvertisementId;
pub use identifiers::SellerId;
