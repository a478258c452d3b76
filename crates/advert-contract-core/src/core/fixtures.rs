// crates/advert-contract-core/src/core/fixtures.rs
// ============================================================================
// Module: Fixture Generator
// Description: Seedable generator for advertisement payloads and identifiers.
// Purpose: Produce schema-valid and deliberately invalid inputs reproducibly.
// Dependencies: crate::core, rand, serde_json
// ============================================================================

//! ## Overview
//! [`FixtureGenerator`] wraps an explicitly seeded [`StdRng`]. Scenarios own
//! their generator, so a failing run can be replayed from its seed. Ranges
//! mirror the conventions of the service's reference test data.
//! Invariants:
//! - Same seed produces the same fixture sequence.
//! - [`FixtureGenerator::unused_seller_id`] never overlaps [`SELLER_ID_RANGE`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::RangeInclusive;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use serde_json::json;

use crate::core::advertisement::CreateAdvertisement;
use crate::core::advertisement::FIELD_NAME;
use crate::core::advertisement::FIELD_PRICE;
use crate::core::advertisement::FIELD_SELLER_ID_REQUEST;
use crate::core::advertisement::Statistics;
use crate::core::identifiers::AdvertisementId;
use crate::core::identifiers::SellerId;

// ============================================================================
// SECTION: Ranges
// ============================================================================

/// Seller identifiers drawn for created advertisements.
pub const SELLER_ID_RANGE: RangeInclusive<i64> = 111_111 ..= 999_999;
/// Seller identifiers reserved for "no items" probes; disjoint from [`SELLER_ID_RANGE`].
pub const UNUSED_SELLER_ID_RANGE: RangeInclusive<i64> = 100_000 ..= 111_110;
/// Numeric suffix appended to generated names.
pub const NAME_SUFFIX_RANGE: RangeInclusive<u32> = 1_000 ..= 9_999;
/// Generated prices.
pub const PRICE_RANGE: RangeInclusive<u64> = 100 ..= 10_000;
/// Generated like counters.
pub const LIKES_RANGE: RangeInclusive<u64> = 0 ..= 100;
/// Generated view counters.
pub const VIEW_COUNT_RANGE: RangeInclusive<u64> = 0 ..= 1_000;
/// Generated contact counters.
pub const CONTACTS_RANGE: RangeInclusive<u64> = 0 ..= 50;

/// Prefix of generated advertisement names.
pub const NAME_PREFIX: &str = "Test Item";

// ============================================================================
// SECTION: Malformed Inputs
// ============================================================================

/// Length of the oversized identifier probe.
pub const OVERSIZED_ID_LEN: usize = 1_000;
/// Identifier containing URL-reserved characters.
pub const RESERVED_CHAR_ID: &str = "invalid_id_@#";
/// Seller segment that is not an integer.
pub const NON_INTEGER_SELLER: &str = "invalid_seller";
/// Text submitted in place of the integer seller field.
pub const NON_INTEGER_SELLER_VALUE: &str = "invalid_string";

/// Returns an identifier far longer than any the service issues.
#[must_use]
pub fn oversized_id() -> String {
    "a".repeat(OVERSIZED_ID_LEN)
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Seedable fixture generator.
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    /// Seed the generator was created from.
    seed: u64,
    /// Random source.
    rng: StdRng,
}

impl FixtureGenerator {
    /// Creates a generator from an explicit seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator from a freshly drawn seed, retrievable via [`Self::seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Returns the seed this generator was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a seed for a child generator.
    pub fn derive_seed(&mut self) -> u64 {
        self.rng.gen_range(0 ..= u64::MAX)
    }

    /// Draws a seller identifier from [`SELLER_ID_RANGE`].
    pub fn seller_id(&mut self) -> SellerId {
        SellerId::new(self.rng.gen_range(SELLER_ID_RANGE))
    }

    /// Draws a seller identifier no generated advertisement ever uses.
    pub fn unused_seller_id(&mut self) -> SellerId {
        SellerId::new(self.rng.gen_range(UNUSED_SELLER_ID_RANGE))
    }

    /// Builds a valid create payload, optionally pinned to a seller.
    pub fn advertisement(&mut self, seller: Option<SellerId>) -> CreateAdvertisement {
        let seller_id = seller.unwrap_or_else(|| self.seller_id());
        let suffix = self.rng.gen_range(NAME_SUFFIX_RANGE);
        CreateAdvertisement {
            seller_id,
            name: format!("{NAME_PREFIX} {suffix}"),
            price: self.rng.gen_range(PRICE_RANGE),
            statistics: Statistics {
                likes: self.rng.gen_range(LIKES_RANGE),
                view_count: self.rng.gen_range(VIEW_COUNT_RANGE),
                contacts: self.rng.gen_range(CONTACTS_RANGE),
            },
        }
    }

    /// Builds a well-formed identifier the service never issued.
    ///
    /// The value is UUID-shaped lowercase hex so that it passes any format
    /// check and exercises the not-found path rather than validation.
    pub fn unknown_id(&mut self) -> AdvertisementId {
        let high: u64 = self.rng.gen_range(0 ..= u64::MAX);
        let low: u64 = self.rng.gen_range(0 ..= u64::MAX);
        let hex = format!("{high:016x}{low:016x}");
        AdvertisementId::new(format!(
            "{}-{}-{}-{}-{}",
            &hex[0 .. 8],
            &hex[8 .. 12],
            &hex[12 .. 16],
            &hex[16 .. 20],
            &hex[20 .. 32]
        ))
    }

    /// Builds a create body without the required `statistics` field.
    pub fn missing_statistics(&mut self) -> Value {
        let valid = self.advertisement(None);
        json!({
            FIELD_SELLER_ID_REQUEST: valid.seller_id.get(),
            FIELD_NAME: valid.name,
            FIELD_PRICE: valid.price,
        })
    }

    /// Builds a create body whose `sellerID` is text instead of an integer.
    pub fn wrong_seller_type(&mut self) -> Value {
        let mut body = self.advertisement(None).to_json();
        if let Some(object) = body.as_object_mut() {
            object.insert(
                FIELD_SELLER_ID_REQUEST.to_string(),
                Value::String(NON_INTEGER_SELLER_VALUE.to_string()),
            );
        }
        body
    }
}

/// The fixed payload used by the canonical lifecycle example.
#[must_use]
pub fn canonical_example() -> CreateAdvertisement {
    CreateAdvertisement {
        seller_id: SellerId::new(123_456),
        name: format!("{NAME_PREFIX} 42"),
        price: 500,
        statistics: Statistics {
            likes: 1,
            view_count: 2,
            contacts: 0,
        },
    }
}
