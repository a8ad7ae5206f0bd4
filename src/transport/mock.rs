use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    task::{Context, Poll},
};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};
use url::Url;

use crate::{
    protocol::error::AgentError,
    transport::{BoxFuture, Transport, TransportRequest, TransportResponse},
};

type Handler = dyn Fn(TransportRequest) -> BoxFuture<'static, Result<TransportResponse, AgentError>>
    + Send
    + Sync;

/// Mock transport for internal testing
///
/// This transport is used for unit tests to mock replica responses without
/// requiring a real network connection or a mock HTTP server.
#[derive(Clone)]
pub(crate) struct MockTransport {
    handler: Arc<Handler>,
    base_url: Url,
    calls: Arc<AtomicUsize>,
}

impl MockTransport {
    /// Create a new mock transport with a custom request handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self::new_async(move |req| {
            let response = handler(req);
            Box::pin(async move { Ok(response) })
        })
    }

    /// Create a mock transport whose handler runs asynchronously
    pub fn new_async<F>(handler: F) -> Self
    where
        F: Fn(TransportRequest) -> BoxFuture<'static, Result<TransportResponse, AgentError>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            handler: Arc::new(handler),
            base_url: Url::parse("mock://replica").unwrap(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock transport that replies with the given values
    pub fn replying(values: Vec<Value>) -> Self {
        Self::new(move |_| TransportResponse::new(200).body(replied(values.clone())))
    }

    /// Create a mock transport that fails every request at the network level
    pub fn unreachable() -> Self {
        Self::new_async(|_| {
            Box::pin(async { Err(AgentError::Transport("connection refused".into())) })
        })
    }

    /// Number of requests executed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Build a `replied` envelope body
pub(crate) fn replied(values: Vec<Value>) -> Bytes {
    let body = json!({"status": "replied", "reply": {"arg": values}});
    Bytes::from(serde_json::to_vec(&body).unwrap())
}

/// Build a `rejected` envelope body
pub(crate) fn rejected(code: u64, message: &str) -> Bytes {
    let body = json!({
        "status": "rejected",
        "reject_code": code,
        "reject_message": message,
    });
    Bytes::from(serde_json::to_vec(&body).unwrap())
}

/// Decode the JSON envelope of a request sent through the mock
pub(crate) fn request_json(req: &TransportRequest) -> Value {
    serde_json::from_slice(&req.body).unwrap()
}

#[async_trait]
impl Transport for MockTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), AgentError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(request).await
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport").finish()
    }
}
