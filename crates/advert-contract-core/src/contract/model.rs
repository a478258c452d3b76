// crates/advert-contract-core/src/contract/model.rs
// ============================================================================
// Module: Contract Model
// Description: Per-operation expectations and response verification.
// Purpose: Decide whether one observed response honors the service contract.
// Dependencies: crate::contract, crate::core, serde_json
// ============================================================================

//! ## Overview
//! [`ContractModel`] owns the route table and the status set accepted for
//! ambiguous identifiers. It maps `(operation, outcome)` pairs to
//! [`Expectation`]s and verifies observed responses against them, decoding
//! the body into an [`ObservedBody`] only when every check passes.
//! Invariants:
//! - Every expected `4xx`, including each status in the ambiguous-identifier
//!   set, requires the standard error body.
//! - Create expects an object; read-by-id expects a sequence. The two are
//!   never unified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::contract::ContractError;
use crate::contract::checks::Violation;
use crate::contract::checks::check_shape;
use crate::contract::checks::check_status;
use crate::contract::exchange::ErrorBody;
use crate::contract::exchange::ObservedBody;
use crate::contract::exchange::ObservedResponse;
use crate::contract::exchange::ResponseBody;
use crate::contract::expectation::Expectation;
use crate::contract::expectation::Outcome;
use crate::contract::expectation::ResponseShape;
use crate::contract::expectation::StatusSet;
use crate::contract::routes::Operation;
use crate::contract::routes::RouteTable;
use crate::core::advertisement::FIELD_ID;
use crate::core::advertisement::Statistics;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Success status for every operation.
pub const STATUS_OK: u16 = 200;
/// Validation failure status.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Missing resource status.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Default statuses accepted for malformed or oversized identifiers.
pub const DEFAULT_AMBIGUOUS_STATUSES: [u16; 2] = [STATUS_BAD_REQUEST, STATUS_NOT_FOUND];

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Tunable parts of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractSettings {
    /// Statuses accepted for malformed or oversized identifiers.
    pub ambiguous_id_statuses: Vec<u16>,
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            ambiguous_id_statuses: DEFAULT_AMBIGUOUS_STATUSES.to_vec(),
        }
    }
}

// ============================================================================
// SECTION: Contract Model
// ============================================================================

/// Formalized request/response contract of the advertisement service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractModel {
    /// Versions selected per operation.
    routes: RouteTable,
    /// Statuses accepted for ambiguous identifiers.
    ambiguous: StatusSet,
}

impl Default for ContractModel {
    fn default() -> Self {
        Self {
            routes: RouteTable::default(),
            ambiguous: StatusSet::new(DEFAULT_AMBIGUOUS_STATUSES),
        }
    }
}

impl ContractModel {
    /// Builds a model from a route table and contract settings.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the route table is invalid, the
    /// ambiguous status set is empty, or it contains a non-`4xx` code.
    pub fn new(routes: RouteTable, settings: &ContractSettings) -> Result<Self, ContractError> {
        routes.validate()?;
        let ambiguous = StatusSet::new(settings.ambiguous_id_statuses.iter().copied());
        if ambiguous.is_empty() {
            return Err(ContractError::EmptyStatusSet);
        }
        if let Some(code) = ambiguous.codes().iter().find(|code| !(400 .. 500).contains(*code)) {
            return Err(ContractError::NonClientErrorStatus(*code));
        }
        Ok(Self {
            routes,
            ambiguous,
        })
    }

    /// Returns the route table.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns the statuses accepted for ambiguous identifiers.
    #[must_use]
    pub const fn ambiguous_statuses(&self) -> &StatusSet {
        &self.ambiguous
    }

    /// Returns the expectation for an operation outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Undefined`] when the contract does not define
    /// the outcome for the operation (for example, create + not found).
    pub fn expectation(
        &self,
        operation: Operation,
        outcome: Outcome,
    ) -> Result<Expectation, ContractError> {
        let (statuses, shape) = match (operation, outcome) {
            (Operation::Create, Outcome::Success) => {
                (StatusSet::exactly(STATUS_OK), ResponseShape::Entity)
            }
            (Operation::ReadById, Outcome::Success) => (
                StatusSet::exactly(STATUS_OK),
                ResponseShape::EntitySequence {
                    min_len: 1,
                },
            ),
            (Operation::ListBySeller, Outcome::Success) => (
                StatusSet::exactly(STATUS_OK),
                ResponseShape::EntitySequence {
                    min_len: 0,
                },
            ),
            (Operation::ReadStatistics, Outcome::Success) => {
                (StatusSet::exactly(STATUS_OK), ResponseShape::StatisticsSequence)
            }
            (Operation::Delete, Outcome::Success) => {
                (StatusSet::exactly(STATUS_OK), ResponseShape::Unchecked)
            }
            (Operation::Create | Operation::ListBySeller, Outcome::ValidationError) => {
                (StatusSet::exactly(STATUS_BAD_REQUEST), ResponseShape::ErrorBody)
            }
            (
                Operation::ReadById | Operation::ReadStatistics | Operation::Delete,
                Outcome::NotFound,
            ) => (StatusSet::exactly(STATUS_NOT_FOUND), ResponseShape::ErrorBody),
            (Operation::ReadById | Operation::Delete, Outcome::AmbiguousIdentifier) => {
                (self.ambiguous.clone(), ResponseShape::ErrorBody)
            }
            (operation, outcome) => {
                return Err(ContractError::Undefined {
                    operation,
                    outcome,
                });
            }
        };
        Ok(Expectation {
            operation,
            outcome,
            statuses,
            shape,
        })
    }

    /// Verifies a response against an expectation.
    ///
    /// # Errors
    ///
    /// Returns every [`Violation`] found. A status mismatch is reported alone,
    /// since the body of an unexpected status has no defined shape.
    pub fn verify(
        &self,
        expectation: &Expectation,
        response: &ObservedResponse,
    ) -> Result<ObservedBody, Vec<Violation>> {
        if let Some(violation) = check_status(&expectation.statuses, response.status, &response.body)
        {
            return Err(vec![violation]);
        }
        let violations = check_shape(expectation.shape, &response.body);
        if !violations.is_empty() {
            return Err(violations);
        }
        decode(expectation.shape, &response.body)
    }
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes a body that already passed its shape checks.
fn decode(shape: ResponseShape, body: &ResponseBody) -> Result<ObservedBody, Vec<Violation>> {
    let value = match (shape, body.as_json()) {
        (ResponseShape::Unchecked, _) => return Ok(ObservedBody::Unchecked(body.clone())),
        (_, Some(value)) => value,
        (_, None) => return Err(vec![Violation::new("", "JSON body", "non-JSON body")]),
    };
    match shape {
        ResponseShape::Entity => decode_value(&normalize_id(value)).map(ObservedBody::Entity),
        ResponseShape::EntitySequence {
            ..
        } => {
            let items: Vec<Value> = value
                .as_array()
                .map(|items| items.iter().map(normalize_id).collect())
                .unwrap_or_default();
            decode_value(&Value::Array(items)).map(ObservedBody::Entities)
        }
        ResponseShape::StatisticsSequence => {
            let records: Vec<Statistics> = decode_value(value)?;
            let fields: BTreeSet<String> = value
                .get(0)
                .and_then(Value::as_object)
                .map(|object| object.keys().cloned().collect())
                .unwrap_or_default();
            Ok(ObservedBody::Statistics {
                records,
                fields,
            })
        }
        ResponseShape::ErrorBody => decode_value::<ErrorBody>(value).map(ObservedBody::Error),
        ResponseShape::Unchecked => Ok(ObservedBody::Unchecked(body.clone())),
    }
}

/// Deserializes a checked value, mapping residual failures to a violation.
fn decode_value<T: DeserializeOwned>(value: &Value) -> Result<T, Vec<Violation>> {
    serde_json::from_value(value.clone())
        .map_err(|err| vec![Violation::new("", "decodable body", err.to_string())])
}

/// Rewrites a numeric `id` to its decimal text so it decodes as an opaque identifier.
fn normalize_id(value: &Value) -> Value {
    let mut value = value.clone();
    let numeric = value.get(FIELD_ID).filter(|id| id.is_number()).map(ToString::to_string);
    if let (Some(text), Some(object)) = (numeric, value.as_object_mut()) {
        object.insert(FIELD_ID.to_string(), Value::String(text));
    }
    value
}
