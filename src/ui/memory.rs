use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use super::{Document, UiError};

#[derive(Debug, Clone)]
enum Element {
    Input(String),
    Text(String),
}

/// In-process document for native front-ends and tests
///
/// Clones share the same elements.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Arc<Mutex<HashMap<String, Element>>>,
}

impl MemoryDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an input element
    pub fn with_input(self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().insert(id.into(), Element::Input(value.into()));
        self
    }

    /// Add or replace a text element
    pub fn with_text(self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.lock().insert(id.into(), Element::Text(text.into()));
        self
    }

    /// Type into an existing input element
    pub fn set_input(&self, id: &str, value: impl Into<String>) -> Result<(), UiError> {
        match self.lock().get_mut(id) {
            Some(Element::Input(current)) => {
                *current = value.into();
                Ok(())
            }
            Some(Element::Text(_)) => Err(UiError::NotAnInput(id.to_string())),
            None => Err(UiError::ElementNotFound(id.to_string())),
        }
    }

    /// Current text of any element
    pub fn text(&self, id: &str) -> Option<String> {
        self.lock().get(id).map(|element| match element {
            Element::Input(value) | Element::Text(value) => value.clone(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Element>> {
        // Element maps hold plain strings; a poisoned lock leaves them usable
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Document for MemoryDocument {
    fn input_value(&self, id: &str) -> Result<String, UiError> {
        match self.lock().get(id) {
            Some(Element::Input(value)) => Ok(value.clone()),
            Some(Element::Text(_)) => Err(UiError::NotAnInput(id.to_string())),
            None => Err(UiError::ElementNotFound(id.to_string())),
        }
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), UiError> {
        match self.lock().get_mut(id) {
            Some(Element::Input(value) | Element::Text(value)) => {
                *value = text.to_string();
                Ok(())
            }
            None => Err(UiError::ElementNotFound(id.to_string())),
        }
    }
}
