//! Actor service request types

use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::protocol::operation::ActorOperation;

/// A request to the actor service
///
/// This wraps an actor operation with the per-call envelope data
#[derive(Debug, Clone)]
pub struct ActorRequest {
    /// The operation to execute
    pub operation: ActorOperation,

    /// Request context (nonce, expiry, metadata)
    pub context: RequestContext,
}

impl ActorRequest {
    /// Create a new actor request
    pub fn new(operation: ActorOperation, context: RequestContext) -> Self {
        Self { operation, context }
    }
}

/// Per-call envelope data
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique nonce so that identical calls are distinct requests
    pub nonce: Uuid,

    /// Point in time after which the replica must drop the request
    pub ingress_expiry: DateTime<Utc>,

    /// Additional metadata headers
    pub metadata: HashMap<String, String>,
}

impl RequestContext {
    /// Create a context expiring `expiry` from now
    pub fn new(expiry: Duration) -> Self {
        let expiry = chrono::Duration::from_std(expiry).unwrap_or(chrono::Duration::MAX);
        Self {
            nonce: Uuid::now_v7(),
            ingress_expiry: Utc::now()
                .checked_add_signed(expiry)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata header
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Ingress expiry as nanoseconds since the Unix epoch, as the replica expects
    pub fn ingress_expiry_nanos(&self) -> u64 {
        self.ingress_expiry
            .timestamp_nanos_opt()
            .and_then(|nanos| u64::try_from(nanos).ok())
            .unwrap_or(u64::MAX)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Duration::from_secs(4 * 60))
    }
}
