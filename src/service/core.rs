//! Core actor call service implementation

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use tower_service::Service;

use crate::{
    codec::Codec,
    protocol::error::AgentError,
    service::{ActorRequest, ActorResponse},
    transport::{BoxFuture, Transport, TransportRequest, TransportResponse},
};

/// Core actor call service that wraps a transport
///
/// This service implements the Tower `Service` trait and turns an
/// [`ActorRequest`] into one transport round trip.
pub struct ActorCallService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> ActorCallService<T>
where
    T: Transport,
{
    /// Create a new actor call service
    ///
    /// # Arguments
    ///
    /// * `transport` - The underlying transport implementation
    /// * `codec` - The codec for serialization/deserialization
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a transport request from an actor request
    fn build_transport_request(
        req: &ActorRequest,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, AgentError> {
        let mut transport_req =
            TransportRequest::new(req.operation.endpoint(), req.operation.method())
                .header("Content-Type", codec.content_type())
                .header("Accept", codec.content_type());

        for (key, value) in &req.context.metadata {
            transport_req = transport_req.header(key.clone(), value.clone());
        }

        let body = codec.encode_request(req)?;
        Ok(transport_req.body(body))
    }

    /// Parse a transport response into an actor response
    fn parse_transport_response(
        transport_resp: TransportResponse,
        codec: &dyn Codec,
    ) -> Result<ActorResponse, AgentError> {
        if !transport_resp.is_success() {
            return Err(Self::handle_error_response(&transport_resp));
        }

        codec.decode_response(&transport_resp.body)
    }

    /// Handle error responses from the transport
    fn handle_error_response(transport_resp: &TransportResponse) -> AgentError {
        if let Ok(json) = serde_json::from_slice::<serde_json::Value>(&transport_resp.body) {
            if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
                return AgentError::Transport(format!(
                    "HTTP {}: {}",
                    transport_resp.status, message
                ));
            }
        }

        match std::str::from_utf8(&transport_resp.body) {
            Ok(text) if !text.trim().is_empty() => {
                AgentError::Transport(format!("HTTP {}: {}", transport_resp.status, text.trim()))
            }
            _ => AgentError::Transport(format!("HTTP error: {}", transport_resp.status)),
        }
    }
}

impl<T> Service<ActorRequest> for ActorCallService<T>
where
    T: Transport,
{
    type Response = ActorResponse;
    type Error = AgentError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: ActorRequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let transport_req = Self::build_transport_request(&req, codec.as_ref())?;

            tracing::debug!(
                canister = %req.operation.canister_id(),
                method = req.operation.method_name(),
                nonce = %req.context.nonce,
                "executing {}",
                req.operation.request_type()
            );
            let transport_resp = transport.execute(transport_req).await?;

            let response = Self::parse_transport_response(transport_resp, codec.as_ref())?;
            if let ActorResponse::Rejected { code, message } = &response {
                tracing::debug!(%code, %message, "call rejected");
            }

            Ok(response)
        })
    }
}

impl<T> Clone for ActorCallService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use crate::{
        codec::JsonCodec,
        protocol::{ActorOperation, CallMode, CanisterId},
        service::RequestContext,
        transport::mock::{rejected, replied, request_json, MockTransport},
    };

    use super::*;

    fn greet(name: &str) -> ActorRequest {
        let operation = ActorOperation::new(
            CallMode::Query,
            CanisterId::parse("rrkah-fqaaa-aaaaa-aaaaq-cai").unwrap(),
            "greet",
            vec![json!(name)],
        );
        ActorRequest::new(operation, RequestContext::default().with_metadata("X-Trace", "1"))
    }

    #[tokio::test]
    async fn test_service_query() {
        let transport = MockTransport::new(|req| {
            assert_eq!(req.endpoint, "/api/v2/canister/rrkah-fqaaa-aaaaa-aaaaq-cai/query");
            assert_eq!(req.method, "POST");
            assert_eq!(req.headers.get("X-Trace").map(String::as_str), Some("1"));

            let name = request_json(&req)["arg"][0].as_str().unwrap().to_string();
            TransportResponse::new(200).body(replied(vec![json!(format!("Hello, {}!", name))]))
        });

        let mut service = ActorCallService::new(transport, Arc::new(JsonCodec));
        let response = service.call(greet("World")).await.unwrap();

        assert_eq!(response, ActorResponse::Replied(vec![json!("Hello, World!")]));
    }

    #[tokio::test]
    async fn test_service_passes_rejects_through() {
        let transport = MockTransport::new(|_req| {
            TransportResponse::new(200).body(rejected(5, "canister trapped"))
        });

        let mut service = ActorCallService::new(transport, Arc::new(JsonCodec));
        let response = service.call(greet("World")).await.unwrap();

        assert!(matches!(response, ActorResponse::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_service_error_status() {
        let transport = MockTransport::new(|_req| {
            TransportResponse::new(400).body(Bytes::from_static(br#"{"message": "bad envelope"}"#))
        });

        let mut service = ActorCallService::new(transport, Arc::new(JsonCodec));
        let err = service.call(greet("World")).await.unwrap_err();

        match err {
            AgentError::Transport(message) => assert_eq!(message, "HTTP 400: bad envelope"),
            other => panic!("Expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_service_network_failure() {
        let mut service = ActorCallService::new(MockTransport::unreachable(), Arc::new(JsonCodec));
        let result = service.call(greet("World")).await;

        assert!(matches!(result, Err(AgentError::Transport(_))));
    }
}
