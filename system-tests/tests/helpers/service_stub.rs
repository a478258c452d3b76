// system-tests/tests/helpers/service_stub.rs
// ============================================================================
// Module: Advertisement Service Stub
// Description: In-process HTTP stub of the advertisement API.
// Purpose: Exercise the contract engine over real HTTP with injectable faults.
// Dependencies: axum, serde_json, tokio
// ============================================================================

use std::collections::BTreeMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// Identifiers longer than this are rejected with `400`.
const MAX_ID_LEN: usize = 64;

/// Counter fields every advertisement carries.
const COUNTERS: [&str; 3] = ["likes", "viewCount", "contacts"];

/// Deliberate contract breaks the stub can exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StubFault {
    /// Serve the contract faithfully.
    #[default]
    None,
    /// Read by id returns a bare object instead of a sequence.
    ReadReturnsObject,
    /// Version 2 statistics omit the `contacts` counter.
    StatisticsV2DropsContacts,
}

/// Stored advertisement.
#[derive(Debug, Clone)]
struct StoredItem {
    seller_id: i64,
    entity: Value,
}

/// Mutable stub state.
#[derive(Debug, Default)]
struct Store {
    next_id: u64,
    items: BTreeMap<String, StoredItem>,
}

/// Shared handler state.
#[derive(Debug)]
struct StubState {
    fault: StubFault,
    response_delay: Duration,
    store: Mutex<Store>,
    requests: AtomicUsize,
}

impl StubState {
    fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn admit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.response_delay > Duration::ZERO {
            sleep(self.response_delay).await;
        }
    }
}

/// Handle for the advertisement service stub.
pub struct ServiceStubHandle {
    base_url: String,
    state: Arc<StubState>,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl ServiceStubHandle {
    /// Returns the service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Returns the number of stored advertisements.
    pub fn item_count(&self) -> usize {
        self.state.store().items.len()
    }
}

impl Drop for ServiceStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns a stub that serves the advertisement contract faithfully.
pub async fn spawn_service_stub() -> Result<ServiceStubHandle, String> {
    spawn_service_stub_with(StubFault::None, Duration::ZERO).await
}

/// Spawns a stub that exhibits the given fault.
pub async fn spawn_faulty_service_stub(fault: StubFault) -> Result<ServiceStubHandle, String> {
    spawn_service_stub_with(fault, Duration::ZERO).await
}

/// Spawns a stub that delays every response.
pub async fn spawn_slow_service_stub(
    response_delay: Duration,
) -> Result<ServiceStubHandle, String> {
    spawn_service_stub_with(StubFault::None, response_delay).await
}

#[allow(clippy::unused_async, reason = "Async signature keeps helper API consistent in tests.")]
async fn spawn_service_stub_with(
    fault: StubFault,
    response_delay: Duration,
) -> Result<ServiceStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("service stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("service stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("service stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}");

    let state = Arc::new(StubState {
        fault,
        response_delay,
        store: Mutex::new(Store::default()),
        requests: AtomicUsize::new(0),
    });
    // Segments stay parameterized so seller ids never compete with static route prefixes.
    let app = Router::new()
        .route("/api/{version}/{resource}", post(handle_create))
        .route("/api/{version}/{first}/{second}", get(handle_get).delete(handle_delete))
        .with_state(Arc::clone(&state));
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(ServiceStubHandle {
        base_url,
        state,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

async fn handle_create(
    State(state): State<Arc<StubState>>,
    Path((version, resource)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    state.admit().await;
    if version != "1" || resource != "item" {
        return StatusCode::NOT_FOUND.into_response();
    }
    let parsed: Option<Value> = serde_json::from_slice(&body).ok();
    let Some(body) = parsed else {
        return validation_error("body must be a JSON object");
    };
    let Some(seller_id) = body.get("sellerID").and_then(Value::as_i64) else {
        return validation_error("sellerID must be an integer");
    };
    if !body.get("name").is_some_and(Value::is_string) {
        return validation_error("name is required");
    }
    if body.get("price").and_then(Value::as_u64).is_none() {
        return validation_error("price is required");
    }
    let counters_valid = body.get("statistics").and_then(Value::as_object).is_some_and(|object| {
        COUNTERS.iter().all(|field| object.get(*field).and_then(Value::as_u64).is_some())
    });
    if !counters_valid {
        return validation_error("statistics are required");
    }

    let mut store = state.store();
    store.next_id += 1;
    let id = format!("00000000-0000-4000-8000-{:012x}", store.next_id);
    let entity = json!({
        "id": id,
        "sellerId": seller_id,
        "name": body["name"],
        "price": body["price"],
        "statistics": body["statistics"],
        "createdAt": "2026-10-15 12:00:00.000000 +0300 +0300",
    });
    store.items.insert(id, StoredItem {
        seller_id,
        entity: entity.clone(),
    });
    (StatusCode::OK, Json(entity)).into_response()
}

async fn handle_get(
    State(state): State<Arc<StubState>>,
    Path((version, first, second)): Path<(String, String, String)>,
) -> Response {
    state.admit().await;
    match (version.as_str(), first.as_str(), second.as_str()) {
        ("1", "item", id) => read_item(&state, id),
        ("1" | "2", "statistic", id) => read_statistics(&state, &version, id),
        ("1", seller, "item") => list_items(&state, seller),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn handle_delete(
    State(state): State<Arc<StubState>>,
    Path((version, resource, id)): Path<(String, String, String)>,
) -> Response {
    state.admit().await;
    if version != "2" || resource != "item" {
        return StatusCode::NOT_FOUND.into_response();
    }
    if id.len() > MAX_ID_LEN {
        return validation_error("id is too long");
    }
    match state.store().items.remove(&id) {
        Some(_) => StatusCode::OK.into_response(),
        None => not_found(&id),
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

fn read_item(state: &StubState, id: &str) -> Response {
    if id.len() > MAX_ID_LEN {
        return validation_error("id is too long");
    }
    let store = state.store();
    let Some(item) = store.items.get(id) else {
        return not_found(id);
    };
    let body = if state.fault == StubFault::ReadReturnsObject {
        item.entity.clone()
    } else {
        Value::Array(vec![item.entity.clone()])
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn read_statistics(state: &StubState, version: &str, id: &str) -> Response {
    let store = state.store();
    let Some(item) = store.items.get(id) else {
        return not_found(id);
    };
    let mut statistics = item.entity["statistics"].clone();
    if state.fault == StubFault::StatisticsV2DropsContacts
        && version == "2"
        && let Some(object) = statistics.as_object_mut()
    {
        object.remove("contacts");
    }
    (StatusCode::OK, Json(Value::Array(vec![statistics]))).into_response()
}

fn list_items(state: &StubState, seller: &str) -> Response {
    let Ok(seller_id) = seller.parse::<i64>() else {
        return validation_error("sellerID must be an integer");
    };
    let items: Vec<Value> = state
        .store()
        .items
        .values()
        .filter(|item| item.seller_id == seller_id)
        .map(|item| item.entity.clone())
        .collect();
    (StatusCode::OK, Json(Value::Array(items))).into_response()
}

// ============================================================================
// SECTION: Error Bodies
// ============================================================================

fn validation_error(message: &str) -> Response {
    let body = json!({"result": {"message": message}, "status": "400"});
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn not_found(id: &str) -> Response {
    let body = json!({"result": {"message": format!("item {id} not found")}, "status": "404"});
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
