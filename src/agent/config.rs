//! Agent configuration

use std::time::Duration;

/// Host a local replica listens on by default
pub const DEFAULT_HOST: &str = "http://127.0.0.1:4943";

/// Configuration for an agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the replica, parsed when the HTTP transport is built
    pub host: String,

    /// Default request timeout
    pub timeout: Duration,

    /// How long after submission a request stays valid
    pub ingress_expiry: Duration,
}

impl AgentConfig {
    /// Create a new agent configuration
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: Duration::from_secs(30),
            ingress_expiry: Duration::from_secs(4 * 60),
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the ingress expiry window
    pub fn with_ingress_expiry(mut self, ingress_expiry: Duration) -> Self {
        self.ingress_expiry = ingress_expiry;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}
