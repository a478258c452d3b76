// crates/advert-contract-core/src/contract/checks.rs
// ============================================================================
// Module: Contract Checks
// Description: Structural and relational assertions over service responses.
// Purpose: Turn observed JSON into expected-vs-actual violations.
// Dependencies: crate::contract, crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Checks never stop at the first problem: every missing or mistyped field is
//! reported with a JSON-pointer path so a failure report carries the full
//! diff. Checks are pure and perform no I/O.
//! Invariants:
//! - An empty violation list means the value satisfies the check.
//! - Statistics consistency compares field sets only, never values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::contract::expectation::ResponseShape;
use crate::contract::expectation::StatusSet;
use crate::contract::exchange::ResponseBody;
use crate::contract::routes::ApiVersion;
use crate::core::advertisement::Advertisement;
use crate::core::advertisement::CreateAdvertisement;
use crate::core::advertisement::FIELD_CREATED_AT;
use crate::core::advertisement::FIELD_ID;
use crate::core::advertisement::FIELD_NAME;
use crate::core::advertisement::FIELD_PRICE;
use crate::core::advertisement::FIELD_SELLER_ID;
use crate::core::advertisement::FIELD_STATISTICS;
use crate::core::advertisement::STATISTICS_FIELDS;
use crate::core::identifiers::AdvertisementId;
use crate::core::identifiers::SellerId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum characters of a JSON excerpt embedded in a violation.
pub const MAX_EXCERPT_CHARS: usize = 160;
/// Error body key carrying the detail.
pub const ERROR_FIELD_RESULT: &str = "result";
/// Error body key carrying the status.
pub const ERROR_FIELD_STATUS: &str = "status";

// ============================================================================
// SECTION: Violations
// ============================================================================

/// A single expected-vs-actual mismatch.
///
/// # Invariants
/// - `path` is a JSON pointer into the response body, or `status` for the
///   status line, or empty for the body root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Location of the mismatch.
    pub path: String,
    /// What the contract requires.
    pub expected: String,
    /// What the service returned.
    pub actual: String,
}

impl Violation {
    /// Creates a violation.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "<body>" } else { self.path.as_str() };
        write!(f, "{path}: expected {}, got {}", self.expected, self.actual)
    }
}

// ============================================================================
// SECTION: Status and Shape
// ============================================================================

/// Checks a status code against the acceptable set.
#[must_use]
pub fn check_status(expected: &StatusSet, actual: u16, body: &ResponseBody) -> Option<Violation> {
    if expected.contains(actual) {
        return None;
    }
    Some(Violation::new("status", expected.to_string(), format!("{actual} ({})", describe_body(body))))
}

/// Checks a response body against a shape.
#[must_use]
pub fn check_shape(shape: ResponseShape, body: &ResponseBody) -> Vec<Violation> {
    let mut violations = Vec::new();
    if shape == ResponseShape::Unchecked {
        return violations;
    }
    let Some(value) = body.as_json() else {
        violations.push(Violation::new("", "JSON body", describe_body(body)));
        return violations;
    };
    match shape {
        ResponseShape::Entity => check_entity(value, "", &mut violations),
        ResponseShape::EntitySequence {
            min_len,
        } => {
            if let Some(items) = expect_sequence(value, min_len, &mut violations) {
                for (index, item) in items.iter().enumerate() {
                    check_entity(item, &format!("/{index}"), &mut violations);
                }
            }
        }
        ResponseShape::StatisticsSequence => {
            if let Some(items) = expect_sequence(value, 1, &mut violations) {
                for (index, item) in items.iter().enumerate() {
                    check_statistics(item, &format!("/{index}"), &mut violations);
                }
            }
        }
        ResponseShape::ErrorBody => check_error_body(value, &mut violations),
        ResponseShape::Unchecked => {}
    }
    violations
}

/// Requires a JSON array with at least `min_len` elements.
fn expect_sequence<'a>(
    value: &'a Value,
    min_len: usize,
    violations: &mut Vec<Violation>,
) -> Option<&'a Vec<Value>> {
    let Some(items) = value.as_array() else {
        violations.push(Violation::new("", "sequence", json_type(value)));
        return None;
    };
    if items.len() < min_len {
        violations.push(Violation::new(
            "",
            format!("sequence with at least {min_len} element(s)"),
            format!("sequence with {} element(s)", items.len()),
        ));
    }
    Some(items)
}

/// Checks the full advertisement shape at `path`.
fn check_entity(value: &Value, path: &str, violations: &mut Vec<Violation>) {
    let Some(object) = expect_object(value, path, violations) else {
        return;
    };
    if let Some(id) = expect_field(object, path, FIELD_ID, violations) {
        match id {
            Value::String(text) if !text.is_empty() => {}
            Value::Number(_) => {}
            other => violations.push(Violation::new(
                pointer(path, FIELD_ID),
                "non-empty string or number",
                describe_value(other),
            )),
        }
    }
    if let Some(seller) = expect_field(object, path, FIELD_SELLER_ID, violations)
        && seller.as_i64().is_none()
    {
        violations.push(Violation::new(
            pointer(path, FIELD_SELLER_ID),
            "integer",
            describe_value(seller),
        ));
    }
    if let Some(name) = expect_field(object, path, FIELD_NAME, violations) {
        match name.as_str() {
            Some(text) if !text.is_empty() => {}
            _ => violations.push(Violation::new(
                pointer(path, FIELD_NAME),
                "non-empty string",
                describe_value(name),
            )),
        }
    }
    if let Some(price) = expect_field(object, path, FIELD_PRICE, violations)
        && price.as_u64().is_none()
    {
        violations.push(Violation::new(
            pointer(path, FIELD_PRICE),
            "non-negative integer",
            describe_value(price),
        ));
    }
    if let Some(created_at) = expect_field(object, path, FIELD_CREATED_AT, violations)
        && !created_at.is_string()
    {
        violations.push(Violation::new(
            pointer(path, FIELD_CREATED_AT),
            "timestamp string",
            describe_value(created_at),
        ));
    }
    if let Some(statistics) = expect_field(object, path, FIELD_STATISTICS, violations) {
        check_statistics(statistics, &pointer(path, FIELD_STATISTICS), violations);
    }
}

/// Checks a statistics record at `path`: all counters present and non-negative.
fn check_statistics(value: &Value, path: &str, violations: &mut Vec<Violation>) {
    let Some(object) = expect_object(value, path, violations) else {
        return;
    };
    for field in STATISTICS_FIELDS {
        if let Some(counter) = expect_field(object, path, field, violations)
            && counter.as_u64().is_none()
        {
            violations.push(Violation::new(
                pointer(path, field),
                "non-negative integer",
                describe_value(counter),
            ));
        }
    }
}

/// Checks the standard error body: both keys present, values unconstrained.
fn check_error_body(value: &Value, violations: &mut Vec<Violation>) {
    let Some(object) = expect_object(value, "", violations) else {
        return;
    };
    for field in [ERROR_FIELD_RESULT, ERROR_FIELD_STATUS] {
        let _ = expect_field(object, "", field, violations);
    }
}

/// Requires an object at `path`.
fn expect_object<'a>(
    value: &'a Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'a Map<String, Value>> {
    let object = value.as_object();
    if object.is_none() {
        violations.push(Violation::new(path, "object", json_type(value)));
    }
    object
}

/// Requires `field` on `object`, recording a violation when missing.
fn expect_field<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'a Value> {
    let value = object.get(field);
    if value.is_none() {
        violations.push(Violation::new(pointer(path, field), "present", "missing"));
    }
    value
}

// ============================================================================
// SECTION: Relational Checks
// ============================================================================

/// Checks that a returned advertisement echoes the submitted payload.
#[must_use]
pub fn check_echo(sent: &CreateAdvertisement, observed: &Advertisement, path: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    if observed.seller_id != sent.seller_id {
        violations.push(Violation::new(
            pointer(path, FIELD_SELLER_ID),
            sent.seller_id.to_string(),
            observed.seller_id.to_string(),
        ));
    }
    if observed.name != sent.name {
        violations.push(Violation::new(
            pointer(path, FIELD_NAME),
            quoted(&sent.name),
            quoted(&observed.name),
        ));
    }
    if observed.price != sent.price {
        violations.push(Violation::new(
            pointer(path, FIELD_PRICE),
            sent.price.to_string(),
            observed.price.to_string(),
        ));
    }
    violations
}

/// Checks that the first element of a read-by-id sequence is the requested advertisement.
#[must_use]
pub fn check_first_id(requested: &AdvertisementId, entities: &[Advertisement]) -> Vec<Violation> {
    match entities.first() {
        Some(first) if &first.id == requested => Vec::new(),
        Some(first) => {
            vec![Violation::new("/0/id", quoted(requested.as_str()), quoted(first.id.as_str()))]
        }
        None => vec![Violation::new("/0", quoted(requested.as_str()), "empty sequence")],
    }
}

/// Checks that every listed advertisement belongs to `seller`.
#[must_use]
pub fn check_seller_filter(seller: SellerId, entities: &[Advertisement]) -> Vec<Violation> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, entity)| entity.seller_id != seller)
        .map(|(index, entity)| {
            Violation::new(
                format!("/{index}/{FIELD_SELLER_ID}"),
                seller.to_string(),
                format!("{} (id {})", entity.seller_id, entity.id),
            )
        })
        .collect()
}

/// Checks that an advertisement appears in a listing.
#[must_use]
pub fn check_membership(id: &AdvertisementId, entities: &[Advertisement]) -> Vec<Violation> {
    if entities.iter().any(|entity| &entity.id == id) {
        return Vec::new();
    }
    vec![Violation::new(
        "",
        format!("sequence containing id {}", quoted(id.as_str())),
        format!("{} advertisement(s) without it", entities.len()),
    )]
}

/// Checks that a sequence is empty.
#[must_use]
pub fn check_empty(entities: &[Advertisement]) -> Vec<Violation> {
    if entities.is_empty() {
        return Vec::new();
    }
    vec![Violation::new("", "empty sequence", format!("sequence with {} element(s)", entities.len()))]
}

/// Checks that two statistics versions expose the same field set.
///
/// Values are ignored: counters may change between the two reads.
#[must_use]
pub fn check_statistics_consistency(
    left: (ApiVersion, &BTreeSet<String>),
    right: (ApiVersion, &BTreeSet<String>),
) -> Vec<Violation> {
    let (left_version, left_fields) = left;
    let (right_version, right_fields) = right;
    let mut violations = Vec::new();
    for field in left_fields.difference(right_fields) {
        violations.push(Violation::new(
            format!("{right_version}/0/{field}"),
            format!("present (as in {left_version})"),
            "missing",
        ));
    }
    for field in right_fields.difference(left_fields) {
        violations.push(Violation::new(
            format!("{left_version}/0/{field}"),
            format!("present (as in {right_version})"),
            "missing",
        ));
    }
    violations
}

/// Checks that identifiers collected during a run are distinct.
#[must_use]
pub fn check_unique_ids<'a>(ids: impl IntoIterator<Item = &'a AdvertisementId>) -> Vec<Violation> {
    let mut seen = BTreeSet::new();
    let mut violations = Vec::new();
    for id in ids {
        if !seen.insert(id) {
            violations.push(Violation::new(
                FIELD_ID,
                "identifier not issued before",
                format!("duplicate {}", quoted(id.as_str())),
            ));
        }
    }
    violations
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Joins a JSON pointer prefix and a key.
fn pointer(path: &str, field: &str) -> String {
    format!("{path}/{field}")
}

/// Wraps text in double quotes.
fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}

/// Names the JSON type of a value.
fn json_type(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("sequence with {} element(s)", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

/// Describes a scalar value verbatim and a compound value by a truncated excerpt.
#[must_use]
pub fn describe_value(value: &Value) -> String {
    let text = value.to_string();
    truncate(&text)
}

/// Describes a response body for diagnostics.
#[must_use]
pub fn describe_body(body: &ResponseBody) -> String {
    match body {
        ResponseBody::Empty => "empty body".to_string(),
        ResponseBody::Json(value) => describe_value(value),
        ResponseBody::Text(text) => format!("non-JSON body {}", quoted(&truncate(text))),
    }
}

/// Truncates text to [`MAX_EXCERPT_CHARS`] characters.
fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}
