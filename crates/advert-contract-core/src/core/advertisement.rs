// crates/advert-contract-core/src/core/advertisement.rs
// ============================================================================
// Module: Advertisement Entities
// Description: Request payloads and decoded response entities.
// Purpose: Model the advertisement resource as it crosses the wire.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! The create payload and the returned entity spell the seller field
//! differently (`sellerID` in requests, `sellerId` in responses). Both
//! spellings are kept literally; conformance depends on them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::AdvertisementId;
use crate::core::identifiers::SellerId;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Request key for the seller identifier.
pub const FIELD_SELLER_ID_REQUEST: &str = "sellerID";
/// Response key for the seller identifier.
pub const FIELD_SELLER_ID: &str = "sellerId";
/// Advertisement identifier key.
pub const FIELD_ID: &str = "id";
/// Advertisement name key.
pub const FIELD_NAME: &str = "name";
/// Advertisement price key.
pub const FIELD_PRICE: &str = "price";
/// Creation timestamp key.
pub const FIELD_CREATED_AT: &str = "createdAt";
/// Embedded statistics key.
pub const FIELD_STATISTICS: &str = "statistics";
/// Likes counter key.
pub const FIELD_LIKES: &str = "likes";
/// View counter key.
pub const FIELD_VIEW_COUNT: &str = "viewCount";
/// Contacts counter key.
pub const FIELD_CONTACTS: &str = "contacts";

/// Counter keys that must always appear together in a statistics record.
pub const STATISTICS_FIELDS: [&str; 3] = [FIELD_LIKES, FIELD_VIEW_COUNT, FIELD_CONTACTS];

// ============================================================================
// SECTION: Statistics
// ============================================================================

/// Engagement counters attached to an advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of likes.
    pub likes: u64,
    /// Number of views.
    pub view_count: u64,
    /// Number of contact requests.
    pub contacts: u64,
}

// ============================================================================
// SECTION: Create Payload
// ============================================================================

/// Body of a create request.
///
/// # Invariants
/// - Serializes with the request spelling `sellerID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAdvertisement {
    /// Owning seller.
    #[serde(rename = "sellerID")]
    pub seller_id: SellerId,
    /// Display name.
    pub name: String,
    /// Price in whole currency units.
    pub price: u64,
    /// Initial counters.
    pub statistics: Statistics,
}

impl CreateAdvertisement {
    /// Serializes the payload into a JSON body.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            FIELD_SELLER_ID_REQUEST: self.seller_id.get(),
            FIELD_NAME: self.name,
            FIELD_PRICE: self.price,
            FIELD_STATISTICS: {
                FIELD_LIKES: self.statistics.likes,
                FIELD_VIEW_COUNT: self.statistics.view_count,
                FIELD_CONTACTS: self.statistics.contacts,
            },
        })
    }
}

// ============================================================================
// SECTION: Advertisement
// ============================================================================

/// Advertisement entity as returned by the service.
///
/// # Invariants
/// - Decoded only after the body passed the shape checks in
///   [`crate::contract::checks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    /// Service-assigned identifier.
    pub id: AdvertisementId,
    /// Owning seller.
    pub seller_id: SellerId,
    /// Display name.
    pub name: String,
    /// Price in whole currency units.
    pub price: u64,
    /// Creation timestamp in the service's own text format.
    pub created_at: String,
    /// Current counters.
    pub statistics: Statistics,
}
