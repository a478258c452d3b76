// crates/advert-contract-runner/tests/common/mod.rs
// ============================================================================
// Module: In-Memory Advertisement Service
// Description: Transport double that serves the advertisement contract.
// Purpose: Drive the engine without a network, with injectable faults.
// ============================================================================

#![allow(dead_code, reason = "Shared across test binaries that use different helpers.")]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::PoisonError;

use advert_contract_core::ApiRequest;
use advert_contract_core::ApiVersion;
use advert_contract_core::ObservedResponse;
use advert_contract_core::ResponseBody;
use advert_contract_core::Route;
use advert_contract_http::Transport;
use advert_contract_http::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use serde_json::json;

/// Identifiers longer than this are rejected with `400`.
const MAX_ID_LEN: usize = 64;

/// Deliberate contract breaks the service can exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    /// Serve the contract faithfully.
    #[default]
    None,
    /// Create echoes a price one higher than submitted.
    WrongEchoPrice,
    /// List returns every stored item regardless of seller.
    ListIgnoresSeller,
    /// Read by id returns a bare object instead of a sequence.
    ReadReturnsObject,
    /// Every create returns the same identifier.
    RepeatedIds,
    /// Version 2 statistics omit the `contacts` counter.
    StatisticsV2DropsContacts,
    /// Validation failures return `400` with an empty body.
    BareValidationErrors,
    /// Every request fails before a response arrives.
    Unreachable,
}

/// Stored advertisement.
#[derive(Debug, Clone)]
struct Item {
    seller_id: i64,
    entity: Value,
}

/// Mutable service state.
#[derive(Debug, Default)]
struct State {
    next_id: u64,
    items: BTreeMap<String, Item>,
    requests: usize,
}

/// In-memory advertisement service.
#[derive(Debug, Default)]
pub struct FakeService {
    fault: Fault,
    state: Mutex<State>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fault(fault: Fault) -> Self {
        Self {
            fault,
            state: Mutex::new(State::default()),
        }
    }

    /// Stores an advertisement for `seller_id` outside any scenario.
    pub fn seed_item(&self, seller_id: i64) -> String {
        let body = json!({
            "sellerID": seller_id,
            "name": "Foreign Item",
            "price": 1,
            "statistics": {"likes": 0, "viewCount": 0, "contacts": 0},
        });
        let mut state = self.lock();
        let id = state.allocate_id(Fault::None);
        let entity = entity_from(&id, &body);
        state.items.insert(id.clone(), Item {
            seller_id,
            entity,
        });
        id
    }

    /// Number of stored advertisements.
    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    /// Number of requests served.
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, request: &ApiRequest) -> ObservedResponse {
        let mut state = self.lock();
        state.requests += 1;
        match &request.route {
            Route::Create {
                ..
            } => self.create(&mut state, request.body.as_ref()),
            Route::ReadById {
                id, ..
            } => {
                if id.len() > MAX_ID_LEN {
                    return self.validation_error("id is too long");
                }
                match state.items.get(id) {
                    Some(item) if self.fault == Fault::ReadReturnsObject => {
                        json_response(200, item.entity.clone())
                    }
                    Some(item) => json_response(200, Value::Array(vec![item.entity.clone()])),
                    None => not_found(id),
                }
            }
            Route::ListBySeller {
                seller, ..
            } => {
                let Ok(seller_id) = seller.parse::<i64>() else {
                    return self.validation_error("sellerID must be an integer");
                };
                let items: Vec<Value> = state
                    .items
                    .values()
                    .filter(|item| {
                        self.fault == Fault::ListIgnoresSeller || item.seller_id == seller_id
                    })
                    .map(|item| item.entity.clone())
                    .collect();
                json_response(200, Value::Array(items))
            }
            Route::Statistics {
                version,
                id,
            } => match state.items.get(id) {
                Some(item) => {
                    let mut statistics = item.entity["statistics"].clone();
                    if self.fault == Fault::StatisticsV2DropsContacts
                        && *version == ApiVersion::V2
                        && let Some(object) = statistics.as_object_mut()
                    {
                        object.remove("contacts");
                    }
                    json_response(200, Value::Array(vec![statistics]))
                }
                None => not_found(id),
            },
            Route::Delete {
                id, ..
            } => {
                if id.len() > MAX_ID_LEN {
                    return self.validation_error("id is too long");
                }
                match state.items.remove(id) {
                    Some(_) => ObservedResponse::new(200, ResponseBody::Empty),
                    None => not_found(id),
                }
            }
        }
    }

    fn create(&self, state: &mut State, body: Option<&Value>) -> ObservedResponse {
        let Some(body) = body else {
            return self.validation_error("body is required");
        };
        let Some(seller_id) = body.get("sellerID").and_then(Value::as_i64) else {
            return self.validation_error("sellerID must be an integer");
        };
        if !body.get("name").is_some_and(Value::is_string) {
            return self.validation_error("name is required");
        }
        if body.get("price").and_then(Value::as_u64).is_none() {
            return self.validation_error("price is required");
        }
        let counters_valid = body.get("statistics").and_then(Value::as_object).is_some_and(|object| {
            ["likes", "viewCount", "contacts"]
                .iter()
                .all(|field| object.get(*field).and_then(Value::as_u64).is_some())
        });
        if !counters_valid {
            return self.validation_error("statistics are required");
        }
        let id = state.allocate_id(self.fault);
        let mut entity = entity_from(&id, body);
        if self.fault == Fault::WrongEchoPrice {
            let price = entity["price"].as_u64().unwrap_or_default();
            entity["price"] = json!(price + 1);
        }
        state.items.insert(id, Item {
            seller_id,
            entity: entity.clone(),
        });
        json_response(200, entity)
    }

    fn validation_error(&self, message: &str) -> ObservedResponse {
        if self.fault == Fault::BareValidationErrors {
            return ObservedResponse::new(400, ResponseBody::Empty);
        }
        json_response(400, json!({"result": {"message": message}, "status": "400"}))
    }
}

impl State {
    fn allocate_id(&mut self, fault: Fault) -> String {
        if fault == Fault::RepeatedIds {
            return "00000000-0000-4000-8000-000000000001".to_string();
        }
        self.next_id += 1;
        format!("00000000-0000-4000-8000-{:012x}", self.next_id)
    }
}

#[async_trait]
impl Transport for FakeService {
    async fn execute(&self, request: &ApiRequest) -> Result<ObservedResponse, TransportError> {
        if self.fault == Fault::Unreachable {
            return Err(TransportError::Connect("connection refused".to_string()));
        }
        Ok(self.handle(request))
    }
}

fn entity_from(id: &str, body: &Value) -> Value {
    json!({
        "id": id,
        "sellerId": body["sellerID"],
        "name": body["name"],
        "price": body["price"],
        "statistics": body["statistics"],
        "createdAt": "2026-10-15 12:00:00.000000 +0300 +0300",
    })
}

fn json_response(status: u16, value: Value) -> ObservedResponse {
    ObservedResponse::new(status, ResponseBody::Json(value))
}

fn not_found(id: &str) -> ObservedResponse {
    json_response(404, json!({"result": {"message": format!("item {id} not found")}, "status": "404"}))
}
