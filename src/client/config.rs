//! Greeting client configuration

use crate::{agent::AgentConfig, protocol::canister::CanisterId, ui::DomIds};

/// Everything needed to initialize a greeting client
#[derive(Debug, Clone)]
pub struct GreetingConfig {
    /// Agent settings
    pub agent: AgentConfig,

    /// The `communitea` canister to greet through
    pub canister_id: CanisterId,

    /// Element ids of the form
    pub ids: DomIds,
}

impl GreetingConfig {
    /// Create a configuration with default agent settings and element ids
    pub fn new(canister_id: CanisterId) -> Self {
        Self {
            agent: AgentConfig::default(),
            canister_id,
            ids: DomIds::default(),
        }
    }

    /// Set the agent settings
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Set the element ids
    pub fn with_ids(mut self, ids: DomIds) -> Self {
        self.ids = ids;
        self
    }
}
