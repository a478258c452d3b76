// crates/advert-contract-core/src/contract/exchange.rs
// ============================================================================
// Module: Request/Response Exchange
// Description: Transport-neutral request and response records.
// Purpose: Carry raw service responses into the contract checks.
// Dependencies: crate::contract::routes, crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ApiRequest`] is what a transport sends; [`ObservedResponse`] is the
//! unmodified first response it received. [`ObservedBody`] is the typed view
//! produced only after a response satisfied its expectation. The body variants
//! keep the create-object / read-sequence asymmetry explicit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::contract::routes::Route;
use crate::core::advertisement::Advertisement;
use crate::core::advertisement::Statistics;

// ============================================================================
// SECTION: Request
// ============================================================================

/// Request issued against the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Target route.
    pub route: Route,
    /// JSON body for POST requests.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request without a body.
    #[must_use]
    pub const fn new(route: Route) -> Self {
        Self {
            route,
            body: None,
        }
    }

    /// Creates a request with a JSON body.
    #[must_use]
    pub const fn with_body(route: Route, body: Value) -> Self {
        Self {
            route,
            body: Some(body),
        }
    }
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// Raw response body as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResponseBody {
    /// Zero-length body.
    Empty,
    /// Body parsed as JSON.
    Json(Value),
    /// Body that is not valid JSON, kept verbatim.
    Text(String),
}

impl ResponseBody {
    /// Classifies raw bytes into a body variant.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }
        serde_json::from_slice(bytes).map_or_else(
            |_| Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            Self::Json,
        )
    }

    /// Returns the JSON value when the body parsed as JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Empty | Self::Text(_) => None,
        }
    }
}

/// Status and body of a single service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: ResponseBody,
}

impl ObservedResponse {
    /// Creates an observed response.
    #[must_use]
    pub const fn new(status: u16, body: ResponseBody) -> Self {
        Self {
            status,
            body,
        }
    }
}

// ============================================================================
// SECTION: Typed Bodies
// ============================================================================

/// Standard error body returned with every `4xx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Implementation-defined error detail.
    pub result: Value,
    /// Implementation-defined status value.
    pub status: Value,
}

/// Decoded body of a response that met its expectation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedBody {
    /// Single advertisement object (create).
    Entity(Advertisement),
    /// Sequence of advertisements (read by id, list by seller).
    Entities(Vec<Advertisement>),
    /// Sequence of statistics records with the field set of the first record.
    Statistics {
        /// Decoded records.
        records: Vec<Statistics>,
        /// Keys present on the first record.
        fields: BTreeSet<String>,
    },
    /// Standard error body.
    Error(ErrorBody),
    /// Body whose shape is not part of the expectation.
    Unchecked(ResponseBody),
}
