//! Core actor protocol types and definitions

pub mod canister;
mod did;
pub mod error;
pub mod idl;
pub mod operation;

pub use canister::CanisterId;
pub use error::{AgentError, IdlParseError, RejectCode};
pub use idl::{communitea_interface, CallMode, IdlType, InterfaceDescription, MethodSignature};
pub use operation::ActorOperation;
