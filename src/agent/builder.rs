//! Agent builder

use std::{sync::Arc, time::Duration};

use url::Url;

use crate::{
    agent::{Agent, AgentConfig},
    codec::{Codec, JsonCodec},
    protocol::error::AgentError,
    service::ActorCallService,
    transport::{HttpTransport, Transport},
};

/// Builder for constructing agents
///
/// # Example
///
/// ```rust,no_run
/// use communitea_client::prelude::*;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), AgentError> {
/// let agent = AgentBuilder::new_http("https://icp0.io")
///     .with_timeout(Duration::from_secs(10))
///     .build_http()?;
/// # Ok(())
/// # }
/// ```
///
/// # Compiler Error
/// This will fail to compile if it is not clear to the compiler which type
/// implementing `Transport` is being used. This is expected behaviour.
///
/// ```compile_fail
/// let agent = communitea_client::agent::AgentBuilder::new(Default::default()).build();
/// ```
pub struct AgentBuilder<T: Transport> {
    config: AgentConfig,
    transport: Option<T>,
    codec: Option<Arc<dyn Codec>>,
}

impl<T: Transport> AgentBuilder<T> {
    /// Start from a configuration; a transport must still be supplied
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            transport: None,
            codec: None,
        }
    }

    /// Use a custom transport
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport implementation to use
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom codec
    ///
    /// # Arguments
    ///
    /// * `codec` - The codec implementation to use
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set how long a submitted request stays valid
    pub fn with_ingress_expiry(mut self, ingress_expiry: Duration) -> Self {
        self.config.ingress_expiry = ingress_expiry;
        self
    }

    /// Build the agent
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No transport has been configured
    /// - The timeout or ingress expiry is zero
    pub fn build(self) -> Result<Agent<T>, AgentError> {
        let transport = self.transport.ok_or_else(|| {
            AgentError::Config("Transport not configured. Call with_transport() or new_http()".into())
        })?;

        if self.config.timeout.is_zero() {
            return Err(AgentError::Config("timeout must be greater than zero".into()));
        }
        if self.config.ingress_expiry.is_zero() {
            return Err(AgentError::Config(
                "ingress expiry must be greater than zero".into(),
            ));
        }

        let codec = self.codec.unwrap_or_else(|| Arc::new(JsonCodec));
        let service = ActorCallService::new(transport, codec);

        tracing::debug!(host = %self.config.host, "agent created");
        Ok(Agent::new(service, self.config))
    }
}

impl AgentBuilder<HttpTransport> {
    /// Create a new agent builder with HTTP transport
    ///
    /// # Arguments
    ///
    /// * `host` - The base URL of the replica (e.g., "<https://icp0.io>")
    pub fn new_http(host: impl Into<String>) -> Self {
        Self::new(AgentConfig::new(host))
    }

    /// Build the agent, creating the HTTP transport from the final config
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Config` if the host is not a valid URL, plus
    /// everything [`build`](Self::build) rejects.
    pub fn build_http(mut self) -> Result<Agent<HttpTransport>, AgentError> {
        if self.transport.is_none() {
            let host = Url::parse(&self.config.host).map_err(|e| {
                AgentError::Config(format!("invalid host {:?}: {}", self.config.host, e))
            })?;
            self.transport = Some(HttpTransport::new(host).with_timeout(self.config.timeout));
        }
        self.build()
    }
}

impl Default for AgentBuilder<HttpTransport> {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}
