//! High-level greeting client

pub mod config;
pub mod greeting;

pub use config::GreetingConfig;
pub use greeting::{ClickError, ClickOutcome, GreetingClient};
