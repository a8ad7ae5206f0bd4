//! The page surface the greeting client reads from and writes to

mod memory;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;

pub use memory::MemoryDocument;

use thiserror::Error;

/// Errors raised while touching page elements
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// No element carries the requested id
    #[error("Element not found: #{0}")]
    ElementNotFound(String),

    /// The element exists but cannot supply a value
    #[error("Element #{0} is not an input")]
    NotAnInput(String),

    /// The browser refused to attach an event listener
    #[error("Cannot listen for clicks on #{0}")]
    Listener(String),
}

/// Minimal document access used by the click handler
#[cfg_attr(test, mockall::automock)]
pub trait Document {
    /// Read the current value of an input element, as text
    fn input_value(&self, id: &str) -> Result<String, UiError>;

    /// Replace the text content of an element
    fn set_text(&self, id: &str, text: &str) -> Result<(), UiError>;
}

/// Element ids of the greeting form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomIds {
    /// Text input holding the name
    pub input: String,

    /// Button whose clicks trigger a greeting
    pub button: String,

    /// Element receiving the greeting
    pub output: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            input: "name".to_string(),
            button: "clickMeBtn".to_string(),
            output: "greeting".to_string(),
        }
    }
}
