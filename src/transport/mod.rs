//! Transport abstraction layer for actor calls

pub mod http;
#[cfg(test)]
pub mod mock;

use std::{
    collections::HashMap,
    task::{Context, Poll},
};

pub use http::HttpTransport;
use reqwest::Url;

use async_trait::async_trait;
use bytes::Bytes;

use crate::protocol::error::AgentError;

/// Boxed future returned by services; only `Send` off the browser
#[cfg(not(target_arch = "wasm32"))]
pub type BoxFuture<'a, T> = futures::future::BoxFuture<'a, T>;

/// Boxed future returned by services; only `Send` off the browser
#[cfg(target_arch = "wasm32")]
pub type BoxFuture<'a, T> = futures::future::LocalBoxFuture<'a, T>;

/// `Send + Sync` on native targets, no bound on wasm32 where everything
/// runs on the page's single thread
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSendSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> MaybeSendSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSendSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSendSync for T {}

/// `Send` on native targets, no bound on wasm32
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

/// Protocol-agnostic transport request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The endpoint path (e.g., "/api/v2/canister/aaaaa-aa/query")
    pub endpoint: String,

    /// HTTP method or equivalent operation (e.g., "POST")
    pub method: String,

    /// Headers or metadata for the request
    pub headers: HashMap<String, String>,

    /// Request body as bytes
    pub body: Bytes,
}

impl TransportRequest {
    /// Create a new transport request
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header to the request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }
}

/// Protocol-agnostic transport response
#[derive(Debug)]
pub struct TransportResponse {
    /// Status code (e.g., HTTP status code)
    pub status: u16,

    /// Response headers or metadata
    pub headers: HashMap<String, String>,

    /// Response body as bytes
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a new transport response
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Set the response body
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Core transport trait for executing protocol-agnostic requests
///
/// This trait abstracts over the network so the actor layer can run over
/// reqwest, a browser fetch, or an in-memory stub.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Clone + MaybeSendSync + 'static {
    /// Check if the transport is ready to accept requests
    ///
    /// This is used by Tower's Service trait to implement backpressure
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), AgentError>>;

    /// Execute a transport request asynchronously
    ///
    /// # Arguments
    ///
    /// * `request` - The protocol-agnostic request to execute
    ///
    /// # Returns
    ///
    /// A protocol-agnostic response or an error
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, AgentError>;

    /// Get the base URL or identifier for this transport
    ///
    /// For HTTP transports, this is the replica host (e.g., "<http://127.0.0.1:4943>")
    /// For in-memory transports, this might be "mock://"
    fn base_url(&self) -> &Url;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = TransportRequest::new("/api/v2/canister/aaaaa-aa/query", "POST")
            .header("Content-Type", "application/json")
            .body(Bytes::from_static(b"{}"));

        assert_eq!(req.method, "POST");
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(&req.body[..], b"{}");
    }

    #[test]
    fn test_response_status() {
        assert!(TransportResponse::new(200).is_success());
        assert!(TransportResponse::new(202).is_success());
        assert!(!TransportResponse::new(404).is_success());
        assert!(!TransportResponse::new(503).is_success());
    }
}
