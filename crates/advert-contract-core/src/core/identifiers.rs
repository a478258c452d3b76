// crates/advert-contract-core/src/core/identifiers.rs
// ============================================================================
// Module: Advertisement Identifiers
// Description: Opaque advertisement and seller identifiers.
// Purpose: Provide strongly typed identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Advertisement identifiers are assigned by the service and treated as opaque
//! text. Seller identifiers are integers chosen by the client. Neither type
//! validates ranges: the service decides what it accepts, and conformance
//! scenarios need to send values the service should reject.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Service-assigned advertisement identifier.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvertisementId(String);

impl AdvertisementId {
    /// Creates a new advertisement identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdvertisementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for AdvertisementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AdvertisementId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Seller identifier used to group advertisements.
///
/// # Invariants
/// - Any `i64` is representable; the fixture range is a client convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(i64);

impl SellerId {
    /// Creates a seller identifier from a raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
