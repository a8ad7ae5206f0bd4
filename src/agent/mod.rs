//! Agent: the transport/session handle shared by actors

pub mod builder;
pub mod config;

pub use builder::AgentBuilder;
pub use config::AgentConfig;

use crate::{
    service::{ActorCallService, RequestContext},
    transport::Transport,
};

/// Client-side handle managing the transport to a replica
///
/// An agent knows nothing about any particular canister; actors built on
/// top of it add the canister identity and interface.
///
/// # Example
///
/// ```rust,no_run
/// use communitea_client::prelude::*;
///
/// # async fn example() -> Result<(), AgentError> {
/// let agent = AgentBuilder::default().build_http()?;
/// let actor = CommuniteaActor::new(agent, "rrkah-fqaaa-aaaaa-aaaaq-cai".parse()?);
///
/// let greeting = actor.greet("World").await?;
/// println!("{greeting}");
/// # Ok(())
/// # }
/// ```
pub struct Agent<T> {
    service: ActorCallService<T>,
    config: AgentConfig,
}

impl<T> Agent<T>
where
    T: Transport,
{
    /// Create a new agent
    ///
    /// # Arguments
    ///
    /// * `service` - The Tower service that executes calls
    /// * `config` - Agent configuration
    pub fn new(service: ActorCallService<T>, config: AgentConfig) -> Self {
        Self { service, config }
    }

    /// Get the agent configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        self.service.transport()
    }

    /// A fresh handle to the call service, for layering
    pub fn service(&self) -> ActorCallService<T> {
        self.service.clone()
    }

    /// Envelope context for a new call
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.config.ingress_expiry)
    }
}

impl<T: Clone> Clone for Agent<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Agent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("host", &self.config.host.as_str())
            .finish()
    }
}
