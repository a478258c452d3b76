// crates/advert-contract-core/src/lib.rs
// ============================================================================
// Module: Advert Contract Core Library
// Description: Public API surface for the advertisement contract model.
// Purpose: Expose entity types, fixtures, and the contract model.
// Dependencies: crate::{core, contract}
// ============================================================================

//! ## Overview
//! Advert contract core formalizes the externally observable contract of an
//! advertisement-listing service: entity shape, identifier semantics,
//! versioned routes, and the error taxonomy across create, read, list,
//! statistics, and delete. It is transport-agnostic; the HTTP adapter and the
//! scenario runner live in sibling crates.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod contract;
pub mod core;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use contract::ApiRequest;
pub use contract::ApiVersion;
pub use contract::ContractError;
pub use contract::ContractModel;
pub use contract::ContractSettings;
pub use contract::ErrorBody;
pub use contract::Expectation;
pub use contract::HttpMethod;
pub use contract::ObservedBody;
pub use contract::ObservedResponse;
pub use contract::Operation;
pub use contract::Outcome;
pub use contract::ResponseBody;
pub use contract::ResponseShape;
pub use contract::Route;
pub use contract::RouteTable;
pub use contract::StatusSet;
pub use contract::Violation;
