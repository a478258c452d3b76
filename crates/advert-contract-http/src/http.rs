// crates/advert-contract-http/src/http.rs
// ============================================================================
// Module: HTTP Transport
// Description: reqwest-backed transport with transcript capture.
// Purpose: Execute contract requests against a live service over HTTP.
// Dependencies: advert-contract-core, reqwest, serde, tracing, url
// ============================================================================

//! ## Overview
//! [`HttpTransport`] joins the configured base URL with the route's path
//! segments, sends exactly one request, and classifies the response body.
//! Every exchange, successful or not, is appended to a transcript that can be
//! written out as a run artifact.
//! Invariants:
//! - Path segments are percent-encoded individually; reserved characters in an
//!   identifier never split or terminate the path.
//! - Redirects are not followed; the first response is the observed response.
//! - Response bodies larger than the configured limit fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use advert_contract_core::ApiRequest;
use advert_contract_core::HttpMethod;
use advert_contract_core::ObservedResponse;
use advert_contract_core::ResponseBody;
use advert_contract_core::Route;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::transport::Transport;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default maximum response body size.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Service base URL (scheme, host, optional path prefix).
    pub base_url: String,
    /// Timeout applied to the full request lifecycle.
    pub timeout: Duration,
    /// Maximum response body size in bytes.
    pub max_response_bytes: usize,
}

impl HttpTransportConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One recorded request/response exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// Monotonic sequence number within the transport.
    pub sequence: u64,
    /// HTTP method.
    pub method: HttpMethod,
    /// Unencoded request path.
    pub path: String,
    /// Request body, when one was sent.
    pub request: Option<Value>,
    /// Response status, when a response was received.
    pub status: Option<u16>,
    /// Response body, when a response was received.
    pub response: Option<ResponseBody>,
    /// Transport error, when no response was received.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// HTTP transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Validated base URL.
    base_url: Url,
    /// Shared client with timeout and redirect policy applied.
    client: Client,
    /// Maximum response body size.
    max_response_bytes: usize,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl HttpTransport {
    /// Builds a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidBaseUrl`] when the base URL does not
    /// parse, is not http(s), or cannot carry path segments, and
    /// [`TransportError::Client`] when the client cannot be built.
    pub fn new(config: &HttpTransportConfig) -> Result<Self, TransportError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;
        Ok(Self {
            base_url,
            client,
            max_response_bytes: config.max_response_bytes,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the validated base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Removes and returns all transcript entries.
    #[must_use]
    pub fn drain_transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |mut entries| std::mem::take(&mut *entries))
    }

    /// Resolves the full request URL for a route.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidBaseUrl`] when the base URL cannot
    /// carry path segments.
    pub fn url_for(&self, route: &Route) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                TransportError::InvalidBaseUrl(format!("{} cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(route.path_segments());
        }
        Ok(url)
    }

    /// Sends one request and reads the bounded body.
    async fn send(&self, request: &ApiRequest) -> Result<ObservedResponse, TransportError> {
        let url = self.url_for(&request.route)?;
        let builder = match request.route.method() {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };
        let response = builder.send().await.map_err(|err| classify_error(&err))?;
        let status = response.status().as_u16();
        let bytes = read_response_body_with_limit(response, self.max_response_bytes).await?;
        Ok(ObservedResponse::new(status, ResponseBody::from_bytes(&bytes)))
    }

    /// Appends an exchange to the transcript.
    fn record(&self, request: &ApiRequest, outcome: &Result<ObservedResponse, TransportError>) {
        let Ok(mut entries) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        let (status, response, error) = match outcome {
            Ok(observed) => (Some(observed.status), Some(observed.body.clone()), None),
            Err(err) => (None, None, Some(err.to_string())),
        };
        entries.push(TranscriptEntry {
            sequence,
            method: request.route.method(),
            path: request.route.display_path(),
            request: request.body.clone(),
            status,
            response,
            error,
        });
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ObservedResponse, TransportError> {
        let outcome = self.send(request).await;
        match &outcome {
            Ok(observed) => debug!(
                route = %request.route,
                status = observed.status,
                "exchange completed"
            ),
            Err(err) => debug!(route = %request.route, error = %err, "exchange failed"),
        }
        self.record(request, &outcome);
        outcome
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and validates the base URL.
fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| TransportError::InvalidBaseUrl(format!("{raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidBaseUrl(format!(
            "{raw}: unsupported scheme {}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(TransportError::InvalidBaseUrl(format!("{raw}: missing host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(TransportError::InvalidBaseUrl(format!(
            "{raw}: query and fragment are not allowed"
        )));
    }
    Ok(url)
}

/// Maps a reqwest send failure onto the transport taxonomy.
fn classify_error(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_body() || err.is_decode() {
        TransportError::Body(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

/// Reads a response body while enforcing a hard byte limit.
async fn read_response_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    let mut total: usize = 0;
    while let Some(chunk) = response.chunk().await.map_err(|err| {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else {
            TransportError::Body(err.to_string())
        }
    })? {
        let next_total = total.checked_add(chunk.len()).ok_or(TransportError::ResponseTooLarge {
            actual: usize::MAX,
            limit,
        })?;
        if next_total > limit {
            return Err(TransportError::ResponseTooLarge {
                actual: next_total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
        total = next_total;
    }
    Ok(body)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
