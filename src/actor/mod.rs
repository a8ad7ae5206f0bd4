//! Remote actor handles
//!
//! An [`Actor`] binds an [`Agent`] to one canister and one interface
//! description. Every call goes through an [`InterfaceValidationLayer`],
//! so calls that do not match the interface never leave the process and
//! replies that do not match it are reported as malformed.

mod communitea;

pub use communitea::CommuniteaActor;

use std::sync::Arc;

use serde_json::Value;
use tower::{ServiceBuilder, ServiceExt};

use crate::{
    agent::Agent,
    layer::InterfaceValidationLayer,
    protocol::{
        canister::CanisterId, error::AgentError, idl::InterfaceDescription,
        operation::ActorOperation,
    },
    service::ActorRequest,
    transport::Transport,
};

/// Typed proxy for one canister
pub struct Actor<T> {
    agent: Arc<Agent<T>>,
    canister_id: CanisterId,
    interface: Arc<InterfaceDescription>,
}

impl<T> Actor<T>
where
    T: Transport,
{
    /// Bind an agent to a canister and its interface
    pub fn new(
        agent: impl Into<Arc<Agent<T>>>,
        canister_id: CanisterId,
        interface: InterfaceDescription,
    ) -> Self {
        Self {
            agent: agent.into(),
            canister_id,
            interface: Arc::new(interface),
        }
    }

    /// The agent this actor calls through
    pub fn agent(&self) -> &Arc<Agent<T>> {
        &self.agent
    }

    /// The canister this actor is bound to
    pub fn canister_id(&self) -> &CanisterId {
        &self.canister_id
    }

    /// The interface this actor is bound to
    pub fn interface(&self) -> &InterfaceDescription {
        &self.interface
    }

    /// Call a method by name and return its reply values
    ///
    /// The call mode (query or update) is taken from the interface.
    ///
    /// # Errors
    ///
    /// - `AgentError::Interface` if the method or its arguments do not
    ///   match the interface
    /// - `AgentError::Rejected` if the canister rejects the call
    /// - `AgentError::MalformedReply` if the reply does not match the
    ///   declared result types
    /// - transport errors otherwise
    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Vec<Value>, AgentError> {
        let mode = self
            .interface
            .method(method)
            .map(|signature| signature.mode)
            .ok_or_else(|| {
                AgentError::Interface(format!(
                    "method {:?} is not part of the interface of {}",
                    method, self.canister_id
                ))
            })?;

        let operation = ActorOperation::new(mode, self.canister_id, method, args);
        let request = ActorRequest::new(operation, self.agent.request_context());

        let service = ServiceBuilder::new()
            .layer(InterfaceValidationLayer::new(self.interface.clone()))
            .service(self.agent.service());

        service.oneshot(request).await?.into_result()
    }
}

impl<T> Clone for Actor<T> {
    fn clone(&self) -> Self {
        Self {
            agent: self.agent.clone(),
            canister_id: self.canister_id,
            interface: self.interface.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Actor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("canister_id", &self.canister_id)
            .field("methods", &self.interface.method_names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        agent::{AgentBuilder, AgentConfig},
        protocol::{CallMode, IdlType, MethodSignature},
        transport::{
            mock::{rejected, replied, request_json, MockTransport},
            TransportResponse,
        },
    };

    fn actor(transport: MockTransport) -> Actor<MockTransport> {
        let agent = AgentBuilder::new(AgentConfig::default())
            .with_transport(transport)
            .build()
            .unwrap();
        let interface = InterfaceDescription::new()
            .with_method(
                "greet",
                MethodSignature::new(vec![IdlType::Text], vec![IdlType::Text], CallMode::Query),
            )
            .with_method(
                "vote",
                MethodSignature::new(vec![IdlType::Nat64, IdlType::Bool], vec![], CallMode::Update),
            );

        Actor::new(agent, CanisterId::parse("aaaaa-aa").unwrap(), interface)
    }

    #[tokio::test]
    async fn test_call_uses_declared_mode() {
        let transport = MockTransport::new(|req| {
            let body = request_json(&req);
            let reply = match body["method_name"].as_str() {
                Some("greet") => {
                    assert!(req.endpoint.ends_with("/query"));
                    vec![json!("hi")]
                }
                _ => {
                    assert!(req.endpoint.ends_with("/call"));
                    assert_eq!(body["request_type"], "call");
                    vec![]
                }
            };
            TransportResponse::new(200).body(replied(reply))
        });
        let actor = actor(transport);

        assert_eq!(actor.call("greet", vec![json!("x")]).await.unwrap(), vec![json!("hi")]);
        assert!(actor
            .call("vote", vec![json!(7), json!(true)])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_unknown_method_fails_locally() {
        let transport = MockTransport::replying(vec![]);
        let actor = actor(transport.clone());

        let result = actor.call("farewell", vec![]).await;

        assert!(matches!(result, Err(AgentError::Interface(_))));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_reject_becomes_error() {
        let transport =
            MockTransport::new(|_| TransportResponse::new(200).body(rejected(4, "not allowed")));

        let result = actor(transport).call("vote", vec![json!(1), json!(false)]).await;

        match result {
            Err(AgentError::Rejected { message, .. }) => assert_eq!(message, "not allowed"),
            other => panic!("Expected reject, got {:?}", other),
        }
    }

    #[test]
    fn test_clone_shares_agent() {
        let actor = actor(MockTransport::replying(vec![]));
        let copy = actor.clone();

        assert!(Arc::ptr_eq(actor.agent(), copy.agent()));
    }
}
