//! JSON codec for the HTTP call binding

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    codec::Codec,
    protocol::{
        canister::CanisterId,
        error::{AgentError, RejectCode},
    },
    service::{request::ActorRequest, response::ActorResponse},
};

#[derive(Debug, Serialize)]
struct CallEnvelope<'a> {
    request_type: &'static str,
    canister_id: &'a CanisterId,
    method_name: &'a str,
    arg: &'a [Value],
    nonce: String,
    ingress_expiry: u64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ReplyEnvelope {
    Replied {
        reply: ReplyBody,
    },
    Rejected {
        reject_code: RejectCode,
        reject_message: String,
    },
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    arg: Vec<Value>,
}

/// JSON codec for the HTTP call binding
#[derive(Debug, Clone, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a new JSON codec
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn encode_request(&self, request: &ActorRequest) -> Result<Bytes, AgentError> {
        let operation = &request.operation;
        let envelope = CallEnvelope {
            request_type: operation.request_type(),
            canister_id: operation.canister_id(),
            method_name: operation.method_name(),
            arg: operation.args(),
            nonce: request.context.nonce.to_string(),
            ingress_expiry: request.context.ingress_expiry_nanos(),
        };

        let bytes = serde_json::to_vec(&envelope)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_response(&self, body: &[u8]) -> Result<ActorResponse, AgentError> {
        if body.is_empty() {
            return Err(AgentError::MalformedReply("empty body".into()));
        }

        let envelope: ReplyEnvelope =
            serde_json::from_slice(body).map_err(|e| AgentError::MalformedReply(e.to_string()))?;

        Ok(match envelope {
            ReplyEnvelope::Replied { reply } => ActorResponse::Replied(reply.arg),
            ReplyEnvelope::Rejected {
                reject_code,
                reject_message,
            } => ActorResponse::Rejected {
                code: reject_code,
                message: reject_message,
            },
        })
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        protocol::{ActorOperation, CallMode, CanisterId},
        service::request::RequestContext,
    };

    fn greet_request(name: &str) -> ActorRequest {
        let operation = ActorOperation::new(
            CallMode::Query,
            CanisterId::parse("rrkah-fqaaa-aaaaa-aaaaq-cai").unwrap(),
            "greet",
            vec![json!(name)],
        );
        ActorRequest::new(operation, RequestContext::default())
    }

    #[test]
    fn test_encode_call_envelope() {
        let codec = JsonCodec;
        let request = greet_request("World");

        let bytes = codec.encode_request(&request).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["request_type"], "query");
        assert_eq!(json["canister_id"], "rrkah-fqaaa-aaaaa-aaaaq-cai");
        assert_eq!(json["method_name"], "greet");
        assert_eq!(json["arg"], json!(["World"]));
        assert_eq!(json["nonce"], request.context.nonce.to_string());
        assert!(json["ingress_expiry"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_decode_replied() {
        let codec = JsonCodec;
        let body = r#"{"status": "replied", "reply": {"arg": ["Hello, World!"]}}"#;

        let response = codec.decode_response(body.as_bytes()).unwrap();
        assert_eq!(response, ActorResponse::Replied(vec![json!("Hello, World!")]));
    }

    #[test]
    fn test_decode_rejected() {
        let codec = JsonCodec;
        let body = r#"{"status": "rejected", "reject_code": 3, "reject_message": "no such canister"}"#;

        match codec.decode_response(body.as_bytes()).unwrap() {
            ActorResponse::Rejected { code, message } => {
                assert_eq!(code, RejectCode::DestinationInvalid);
                assert_eq!(message, "no such canister");
            }
            other => panic!("Expected reject, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_malformed() {
        let codec = JsonCodec;

        for body in ["", "not json", r#"{"status": "pending"}"#, r#"{"reply": {}}"#] {
            assert!(matches!(
                codec.decode_response(body.as_bytes()),
                Err(AgentError::MalformedReply(_))
            ));
        }
    }

    #[test]
    fn test_content_type() {
        assert_eq!(JsonCodec::new().content_type(), "application/json");
    }
}
