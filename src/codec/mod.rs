//! Serialization codecs for call bindings

pub mod json;

pub use json::JsonCodec;

use bytes::Bytes;

use crate::{
    protocol::error::AgentError,
    service::{request::ActorRequest, response::ActorResponse},
};

/// Codec trait for encoding calls and decoding replies
///
/// Different codecs implement different bindings of the call envelope.
pub trait Codec: Send + Sync {
    /// Serialize a request envelope to bytes for transport
    ///
    /// # Arguments
    ///
    /// * `request` - The operation and its envelope context
    ///
    /// # Returns
    ///
    /// The serialized bytes or an error
    fn encode_request(&self, request: &ActorRequest) -> Result<Bytes, AgentError>;

    /// Deserialize a reply envelope
    ///
    /// # Arguments
    ///
    /// * `body` - The response body bytes
    ///
    /// # Returns
    ///
    /// The reply or reject, or `MalformedReply` if the body is not an envelope
    fn decode_response(&self, body: &[u8]) -> Result<ActorResponse, AgentError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}
