//! Tower Layer implementations for actor calls

pub mod validation;

pub use validation::{InterfaceValidationLayer, InterfaceValidationService};
