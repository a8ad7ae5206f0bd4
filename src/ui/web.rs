//! Browser bindings: the real DOM and the click listener

use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlElement, HtmlInputElement};

use crate::{
    client::{GreetingClient, GreetingConfig},
    protocol::canister::CanisterId,
    transport::Transport,
};

use super::{Document, UiError};

/// Canister id baked in by the canister build (`dfx` exports it as an env var)
const COMMUNITEA_CANISTER_ID: Option<&str> = option_env!("CANISTER_ID_COMMUNITEA");

/// The page's `document`
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// The document of the current window
    pub fn current() -> Result<Self, UiError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| Self { document })
            .ok_or_else(|| UiError::ElementNotFound("document".into()))
    }

    fn element(&self, id: &str) -> Result<web_sys::Element, UiError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| UiError::ElementNotFound(id.to_string()))
    }
}

impl Document for WebDocument {
    fn input_value(&self, id: &str) -> Result<String, UiError> {
        self.element(id)?
            .dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .map_err(|_| UiError::NotAnInput(id.to_string()))
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), UiError> {
        match self.element(id)?.dyn_into::<HtmlElement>() {
            Ok(element) => element.set_inner_text(text),
            Err(element) => element.set_text_content(Some(text)),
        }
        Ok(())
    }
}

/// Attach the greeting handler to the form's button
///
/// Every click spawns one `handle_click` on the page's event loop. Both
/// outcomes are dealt with here: results are logged, failures are also
/// written to the browser console.
pub fn bind_click<T>(client: Rc<GreetingClient<T>>, document: WebDocument) -> Result<(), UiError>
where
    T: Transport,
{
    let button = document.element(&client.ids().button)?;
    let document = Rc::new(document);

    let handler = Closure::<dyn FnMut()>::new(move || {
        let client = client.clone();
        let document = document.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match client.handle_click(document.as_ref()).await {
                Ok(outcome) => tracing::debug!(?outcome, "click handled"),
                Err(err) => {
                    tracing::warn!(error = %err, "greeting failed");
                    web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
                }
            }
        });
    });

    button
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(|_| UiError::Listener(button.id()))?;

    // The listener lives as long as the page
    handler.forget();
    Ok(())
}

/// Build the client against the page's origin and bind the form
pub fn mount() -> Result<(), JsValue> {
    let canister_id = COMMUNITEA_CANISTER_ID
        .ok_or_else(|| JsValue::from_str("CANISTER_ID_COMMUNITEA was not set at build time"))
        .and_then(|id| CanisterId::parse(id).map_err(|e| JsValue::from_str(&e.to_string())))?;

    let origin = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .location()
        .origin()?;

    let config = GreetingConfig::new(canister_id)
        .with_agent(crate::agent::AgentConfig::new(origin));
    let client = GreetingClient::initialize(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let document = WebDocument::current().map_err(|e| JsValue::from_str(&e.to_string()))?;
    bind_click(Rc::new(client), document).map_err(|e| JsValue::from_str(&e.to_string()))
}
