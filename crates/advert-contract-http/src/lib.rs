// crates/advert-contract-http/src/lib.rs
// ============================================================================
// Module: Advert Contract HTTP Library
// Description: Transport seam and reqwest-backed transport.
// Purpose: Issue contract requests against a live service.
// Dependencies: advert-contract-core, reqwest, url
// ============================================================================

//! ## Overview
//! The [`Transport`] trait is the only seam between the scenario runner and
//! the network. [`HttpTransport`] implements it with a single round trip per
//! call, no retries, and a transcript of every exchange.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::DEFAULT_MAX_RESPONSE_BYTES;
pub use http::DEFAULT_TIMEOUT;
pub use http::HttpTransport;
pub use http::HttpTransportConfig;
pub use http::TranscriptEntry;
pub use transport::Transport;
pub use transport::TransportError;
