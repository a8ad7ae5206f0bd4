//! Error types for remote actor calls

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for agent and actor operations
///
/// From the caller's point of view every variant is a remote call failure;
/// the variants only keep enough detail for diagnostics.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Transport-level error (network, connection, non-2xx status, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timeout error
    #[error("Request timeout")]
    Timeout,

    /// The canister rejected the call
    #[error("Call rejected ({code}): {message}")]
    Rejected {
        /// Reject code reported by the replica
        code: RejectCode,

        /// Human-readable reject message
        message: String,
    },

    /// The reply envelope could not be understood
    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    /// A call or reply does not match the interface description
    #[error("Interface mismatch: {0}")]
    Interface(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Canister id text is not well formed
    #[error("Invalid canister id: {0}")]
    InvalidCanisterId(String),

    /// Agent configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reject codes as numbered by the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum RejectCode {
    SysFatal,
    SysTransient,
    DestinationInvalid,
    CanisterReject,
    CanisterError,
    Unknown(u64),
}

impl From<u64> for RejectCode {
    fn from(code: u64) -> Self {
        match code {
            1 => RejectCode::SysFatal,
            2 => RejectCode::SysTransient,
            3 => RejectCode::DestinationInvalid,
            4 => RejectCode::CanisterReject,
            5 => RejectCode::CanisterError,
            other => RejectCode::Unknown(other),
        }
    }
}

impl From<RejectCode> for u64 {
    fn from(code: RejectCode) -> Self {
        match code {
            RejectCode::SysFatal => 1,
            RejectCode::SysTransient => 2,
            RejectCode::DestinationInvalid => 3,
            RejectCode::CanisterReject => 4,
            RejectCode::CanisterError => 5,
            RejectCode::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for RejectCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectCode::SysFatal => write!(f, "SysFatal"),
            RejectCode::SysTransient => write!(f, "SysTransient"),
            RejectCode::DestinationInvalid => write!(f, "DestinationInvalid"),
            RejectCode::CanisterReject => write!(f, "CanisterReject"),
            RejectCode::CanisterError => write!(f, "CanisterError"),
            RejectCode::Unknown(code) => write!(f, "Unknown({})", code),
        }
    }
}

/// Error raised while parsing an interface description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("IDL parse error: {message}")]
pub struct IdlParseError {
    /// What went wrong, as reported by the parser or type checker
    pub message: String,
}

impl IdlParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgentError::Timeout
        } else if err.is_decode() {
            AgentError::MalformedReply(err.to_string())
        } else {
            AgentError::Transport(err.to_string())
        }
    }
}
