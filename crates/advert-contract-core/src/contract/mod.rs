// crates/advert-contract-core/src/contract/mod.rs
// ============================================================================
// Module: Advertisement Contract
// Description: Routes, expectations, checks, and the contract model.
// Purpose: Formalize the externally observable behavior of the service.
// Dependencies: crate::core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The contract is expressed as data: versioned [`Route`]s per
//! [`Operation`], [`Expectation`]s per outcome, and pure checks that turn a
//! response into [`Violation`]s. Nothing here performs I/O.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod checks;
pub mod exchange;
pub mod expectation;
pub mod model;
pub mod routes;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use checks::Violation;
pub use exchange::ApiRequest;
pub use exchange::ErrorBody;
pub use exchange::ObservedBody;
pub use exchange::ObservedResponse;
pub use exchange::ResponseBody;
pub use expectation::Expectation;
pub use expectation::Outcome;
pub use expectation::ResponseShape;
pub use expectation::StatusSet;
pub use model::ContractModel;
pub use model::ContractSettings;
pub use routes::ApiVersion;
pub use routes::HttpMethod;
pub use routes::Operation;
pub use routes::Route;
pub use routes::RouteTable;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building or querying the contract model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The contract defines no expectation for this pair.
    #[error("contract defines no {outcome} outcome for {operation}")]
    Undefined {
        /// Operation requested.
        operation: Operation,
        /// Outcome requested.
        outcome: Outcome,
    },
    /// Version label not recognized.
    #[error("unknown api version: {0}")]
    UnknownVersion(String),
    /// No statistics version selected.
    #[error("route table must select at least one statistics version")]
    NoStatisticsRoute,
    /// Statistics version listed twice.
    #[error("statistics version {0} listed more than once")]
    DuplicateStatisticsRoute(ApiVersion),
    /// Ambiguous status set is empty.
    #[error("ambiguous identifier status set must not be empty")]
    EmptyStatusSet,
    /// Ambiguous status set contains a code outside 400..=499.
    #[error("ambiguous identifier status {0} is not a client error")]
    NonClientErrorStatus(u16),
}
