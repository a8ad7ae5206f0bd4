//! Remote actor operations

use serde_json::Value;

use super::{canister::CanisterId, idl::CallMode};

/// A call to one method of one canister
///
/// The operation is binding-independent; [`endpoint`](Self::endpoint) and
/// [`method`](Self::method) give its shape on the HTTP binding.
#[derive(Debug, Clone, PartialEq)]
pub enum ActorOperation {
    /// Read-only call answered directly by a replica
    Query {
        /// Target canister
        canister_id: CanisterId,

        /// Remote method name
        method_name: String,

        /// Encoded arguments, in order
        args: Vec<Value>,
    },

    /// State-changing call
    Update {
        /// Target canister
        canister_id: CanisterId,

        /// Remote method name
        method_name: String,

        /// Encoded arguments, in order
        args: Vec<Value>,
    },
}

impl ActorOperation {
    /// Build the operation matching a method's call mode
    pub fn new(
        mode: CallMode,
        canister_id: CanisterId,
        method_name: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        let method_name = method_name.into();
        match mode {
            CallMode::Query => ActorOperation::Query {
                canister_id,
                method_name,
                args,
            },
            CallMode::Update => ActorOperation::Update {
                canister_id,
                method_name,
                args,
            },
        }
    }

    /// Get the HTTP endpoint path for this operation
    pub fn endpoint(&self) -> String {
        match self {
            ActorOperation::Query { canister_id, .. } => {
                format!("/api/v2/canister/{}/query", canister_id)
            }
            ActorOperation::Update { canister_id, .. } => {
                format!("/api/v2/canister/{}/call", canister_id)
            }
        }
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        "POST"
    }

    /// Request type tag carried in the envelope
    pub fn request_type(&self) -> &'static str {
        match self {
            ActorOperation::Query { .. } => "query",
            ActorOperation::Update { .. } => "call",
        }
    }

    /// Target canister
    pub fn canister_id(&self) -> &CanisterId {
        match self {
            ActorOperation::Query { canister_id, .. }
            | ActorOperation::Update { canister_id, .. } => canister_id,
        }
    }

    /// Remote method name
    pub fn method_name(&self) -> &str {
        match self {
            ActorOperation::Query { method_name, .. }
            | ActorOperation::Update { method_name, .. } => method_name,
        }
    }

    /// Encoded arguments
    pub fn args(&self) -> &[Value] {
        match self {
            ActorOperation::Query { args, .. } | ActorOperation::Update { args, .. } => args,
        }
    }

    /// Call mode of this operation
    pub fn mode(&self) -> CallMode {
        match self {
            ActorOperation::Query { .. } => CallMode::Query,
            ActorOperation::Update { .. } => CallMode::Update,
        }
    }
}
