//! Validation layer checking calls and replies against an interface description

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::{error::AgentError, idl::InterfaceDescription},
    service::{ActorRequest, ActorResponse},
    transport::{BoxFuture, MaybeSend},
};

/// Layer that validates actor calls and replies against an interface
#[derive(Clone, Debug)]
pub struct InterfaceValidationLayer {
    interface: Arc<InterfaceDescription>,
}

impl InterfaceValidationLayer {
    /// Create a new validation layer for the given interface
    pub fn new(interface: Arc<InterfaceDescription>) -> Self {
        Self { interface }
    }
}

impl<S> Layer<S> for InterfaceValidationLayer {
    type Service = InterfaceValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterfaceValidationService {
            inner,
            interface: self.interface.clone(),
        }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone, Debug)]
pub struct InterfaceValidationService<S> {
    inner: S,
    interface: Arc<InterfaceDescription>,
}

/// Validate a call before it reaches the transport
fn validate_request(interface: &InterfaceDescription, req: &ActorRequest) -> Result<(), AgentError> {
    let operation = &req.operation;
    let signature = interface.check_call(operation.method_name(), operation.args())?;

    if signature.mode != operation.mode() {
        return Err(AgentError::Interface(format!(
            "{} is declared {:?} but was called as {:?}",
            operation.method_name(),
            signature.mode,
            operation.mode()
        )));
    }

    Ok(())
}

/// Validate reply values against the declared result types
fn validate_response(
    interface: &InterfaceDescription,
    method: &str,
    resp: &ActorResponse,
) -> Result<(), AgentError> {
    match resp {
        ActorResponse::Replied(values) => interface
            .check_reply(method, values)
            .map_err(|e| AgentError::MalformedReply(e.to_string())),
        ActorResponse::Rejected { .. } => Ok(()),
    }
}

impl<S> Service<ActorRequest> for InterfaceValidationService<S>
where
    S: Service<ActorRequest, Response = ActorResponse, Error = AgentError>,
    S::Future: MaybeSend + 'static,
{
    type Response = ActorResponse;
    type Error = AgentError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: ActorRequest) -> Self::Future {
        let interface = self.interface.clone();

        if let Err(e) = validate_request(&interface, &req) {
            return Box::pin(async move { Err::<ActorResponse, _>(e) });
        }

        let method = req.operation.method_name().to_string();
        let future = self.inner.call(req);

        Box::pin(async move {
            let response = future.await?;
            validate_response(&interface, &method, &response)?;
            Ok(response)
        })
    }
}
