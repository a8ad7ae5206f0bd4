//! Actor service response types

use serde_json::Value;

use crate::protocol::error::{AgentError, RejectCode};

/// Response from an actor service call
#[derive(Debug, Clone, PartialEq)]
pub enum ActorResponse {
    /// The canister replied with these values
    Replied(Vec<Value>),

    /// The canister (or the replica on its behalf) rejected the call
    Rejected {
        /// Reject code
        code: RejectCode,

        /// Human-readable reject message
        message: String,
    },
}

impl ActorResponse {
    /// Turn a reject into an error and return the reply values otherwise
    pub fn into_result(self) -> Result<Vec<Value>, AgentError> {
        match self {
            ActorResponse::Replied(values) => Ok(values),
            ActorResponse::Rejected { code, message } => Err(AgentError::Rejected { code, message }),
        }
    }
}
