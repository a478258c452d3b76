// crates/advert-contract-http/src/transport.rs
// ============================================================================
// Module: Transport Interface
// Description: Async request seam used by the scenario runner.
// Purpose: Keep contract scenarios independent of the HTTP client.
// Dependencies: advert-contract-core, async-trait, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Transport`] sends one [`ApiRequest`] and returns the unmodified
//! response. Network-level failures are [`TransportError`]s, never HTTP
//! statuses, so the runner can tell infrastructure failures from contract
//! violations.
//! Invariants:
//! - Bodies and identifiers are passed through raw, so schema-violating
//!   payloads and malformed identifiers reach the service unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use advert_contract_core::ApiRequest;
use advert_contract_core::ApiVersion;
use advert_contract_core::ObservedResponse;
use advert_contract_core::Route;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Infrastructure failures raised by a transport.
///
/// # Invariants
/// - None of these variants carries an HTTP status; any received status is
///   returned as an [`ObservedResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Base URL is malformed or cannot carry path segments.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Client(String),
    /// Request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
    /// Request failed for another reason.
    #[error("request failed: {0}")]
    Request(String),
    /// Response body could not be read.
    #[error("response body error: {0}")]
    Body(String),
    /// Response body exceeds the size limit.
    #[error("response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Bytes received so far.
        actual: usize,
        /// Maximum bytes allowed.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Sends contract requests to the service under test.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one request and returns the first response received.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn execute(&self, request: &ApiRequest) -> Result<ObservedResponse, TransportError>;

    /// Submits a create payload.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn create(
        &self,
        version: ApiVersion,
        payload: Value,
    ) -> Result<ObservedResponse, TransportError> {
        let request = ApiRequest::with_body(
            Route::Create {
                version,
            },
            payload,
        );
        self.execute(&request).await
    }

    /// Reads an advertisement by raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn get_by_id(
        &self,
        version: ApiVersion,
        id: &str,
    ) -> Result<ObservedResponse, TransportError> {
        let request = ApiRequest::new(Route::ReadById {
            version,
            id: id.to_string(),
        });
        self.execute(&request).await
    }

    /// Lists a seller's advertisements by raw seller segment.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn list_by_seller(
        &self,
        version: ApiVersion,
        seller: &str,
    ) -> Result<ObservedResponse, TransportError> {
        let request = ApiRequest::new(Route::ListBySeller {
            version,
            seller: seller.to_string(),
        });
        self.execute(&request).await
    }

    /// Reads advertisement statistics through one version.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn get_statistics(
        &self,
        version: ApiVersion,
        id: &str,
    ) -> Result<ObservedResponse, TransportError> {
        let request = ApiRequest::new(Route::Statistics {
            version,
            id: id.to_string(),
        });
        self.execute(&request).await
    }

    /// Deletes an advertisement by raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn delete(&self, version: ApiVersion, id: &str) -> Result<ObservedResponse, TransportError> {
        let request = ApiRequest::new(Route::Delete {
            version,
            id: id.to_string(),
        });
        self.execute(&request).await
    }
}
