// crates/advert-contract-core/src/contract/expectation.rs
// ============================================================================
// Module: Contract Expectations
// Description: Expected status sets and body shapes per operation outcome.
// Purpose: Encode the error taxonomy and response shapes as data.
// Dependencies: crate::contract::routes, serde
// ============================================================================

//! ## Overview
//! An [`Expectation`] pairs a set of acceptable status codes with a
//! [`ResponseShape`]. Status sets instead of single codes let the
//! ambiguous-identifier outcome accept either `400` or `404`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::contract::routes::Operation;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Outcome class a step expects from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Operation succeeds.
    Success,
    /// Payload or parameter fails schema/type validation (`400`).
    ValidationError,
    /// Referenced resource does not exist (`404`).
    NotFound,
    /// Malformed or oversized identifier; backend revision decides the code.
    AmbiguousIdentifier,
}

impl Outcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ValidationError => "validation_error",
            Self::NotFound => "not_found",
            Self::AmbiguousIdentifier => "ambiguous_identifier",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Status Sets
// ============================================================================

/// Set of acceptable HTTP status codes.
///
/// # Invariants
/// - Codes are sorted and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet(Vec<u16>);

impl StatusSet {
    /// Creates a set from arbitrary codes (sorted and deduplicated).
    #[must_use]
    pub fn new(codes: impl IntoIterator<Item = u16>) -> Self {
        let mut codes: Vec<u16> = codes.into_iter().collect();
        codes.sort_unstable();
        codes.dedup();
        Self(codes)
    }

    /// Creates a set holding exactly one code.
    #[must_use]
    pub fn exactly(code: u16) -> Self {
        Self(vec![code])
    }

    /// Returns true when `code` is acceptable.
    #[must_use]
    pub fn contains(&self, code: u16) -> bool {
        self.0.binary_search(&code).is_ok()
    }

    /// Returns true when no code is acceptable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the codes in ascending order.
    #[must_use]
    pub fn codes(&self) -> &[u16] {
        &self.0
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, code) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Response Shapes
// ============================================================================

/// Expected body shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ResponseShape {
    /// A single advertisement object.
    Entity,
    /// A sequence of advertisements with at least `min_len` elements.
    EntitySequence {
        /// Minimum number of elements.
        min_len: usize,
    },
    /// A non-empty sequence of statistics records.
    StatisticsSequence,
    /// The standard `{result, status}` error body.
    ErrorBody,
    /// Any body.
    Unchecked,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => f.write_str("advertisement object"),
            Self::EntitySequence {
                min_len,
            } => write!(f, "sequence of advertisements (len >= {min_len})"),
            Self::StatisticsSequence => f.write_str("non-empty sequence of statistics"),
            Self::ErrorBody => f.write_str("error body {result, status}"),
            Self::Unchecked => f.write_str("any body"),
        }
    }
}

// ============================================================================
// SECTION: Expectation
// ============================================================================

/// Expected status and body for one operation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// Operation under test.
    pub operation: Operation,
    /// Outcome class.
    pub outcome: Outcome,
    /// Acceptable status codes.
    pub statuses: StatusSet,
    /// Expected body shape.
    pub shape: ResponseShape,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: status {} with {}", self.operation, self.outcome, self.statuses, self.shape)
    }
}
