//! Tower Service implementations

pub mod core;
pub mod request;
pub mod response;

pub use self::core::ActorCallService;
pub use request::{ActorRequest, RequestContext};
pub use response::ActorResponse;
