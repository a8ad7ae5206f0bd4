use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    agent::Agent,
    protocol::{canister::CanisterId, error::AgentError, idl::communitea_interface},
    transport::Transport,
};

use super::Actor;

/// Typed handle for the `communitea` canister
pub struct CommuniteaActor<T> {
    inner: Actor<T>,
}

impl<T> CommuniteaActor<T>
where
    T: Transport,
{
    /// Bind an agent to the `communitea` canister at `canister_id`
    pub fn new(agent: impl Into<Arc<Agent<T>>>, canister_id: CanisterId) -> Self {
        Self {
            inner: Actor::new(agent, canister_id, communitea_interface()),
        }
    }

    /// The untyped actor underneath
    pub fn actor(&self) -> &Actor<T> {
        &self.inner
    }

    /// `greet : (text) -> (text) query`
    pub async fn greet(&self, name: &str) -> Result<String, AgentError> {
        let values = self.inner.call("greet", vec![json!(name)]).await?;
        single_text(values)
    }
}

fn single_text(values: Vec<Value>) -> Result<String, AgentError> {
    match <[Value; 1]>::try_from(values) {
        Ok([Value::String(text)]) => Ok(text),
        _ => Err(AgentError::MalformedReply("expected a single text value".into())),
    }
}

impl<T> Clone for CommuniteaActor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> std::fmt::Debug for CommuniteaActor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CommuniteaActor").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agent::{AgentBuilder, AgentConfig},
        transport::{
            mock::{replied, request_json, MockTransport},
            TransportResponse,
        },
    };

    fn communitea(transport: MockTransport) -> CommuniteaActor<MockTransport> {
        let agent = AgentBuilder::new(AgentConfig::default())
            .with_transport(transport)
            .build()
            .unwrap();
        CommuniteaActor::new(agent, "rrkah-fqaaa-aaaaa-aaaaq-cai".parse().unwrap())
    }

    #[tokio::test]
    async fn test_greet() {
        let transport = MockTransport::new(|req| {
            let name = request_json(&req)["arg"][0].as_str().unwrap().to_string();
            TransportResponse::new(200).body(replied(vec![json!(format!("Hello, {}!", name))]))
        });

        let greeting = communitea(transport).greet("World").await.unwrap();

        assert_eq!(greeting, "Hello, World!");
    }

    #[tokio::test]
    async fn test_greet_sends_empty_name_as_is() {
        let transport = MockTransport::new(|req| {
            assert_eq!(request_json(&req)["arg"], json!([""]));
            TransportResponse::new(200).body(replied(vec![json!("Hello, !")]))
        });

        assert_eq!(communitea(transport).greet("").await.unwrap(), "Hello, !");
    }

    #[tokio::test]
    async fn test_greet_rejects_extra_values() {
        let transport = MockTransport::replying(vec![json!("a"), json!("b")]);

        let result = communitea(transport).greet("World").await;

        assert!(matches!(result, Err(AgentError::MalformedReply(_))));
    }

    #[test]
    fn test_single_text() {
        assert_eq!(single_text(vec![json!("x")]).unwrap(), "x");
        assert!(single_text(vec![]).is_err());
        assert!(single_text(vec![json!(1)]).is_err());
    }
}
