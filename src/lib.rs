//! # communitea-client
//!
//! Greeting front-end for the `communitea` canister, built from Tower
//! services.
//!
//! An [`agent::Agent`] owns the transport to a replica. A
//! [`actor::CommuniteaActor`] binds the agent to the canister and its
//! interface description. A [`client::GreetingClient`] turns clicks on the
//! greeting form into `greet` calls and writes the replies to the page.
//!
//! ## Features
//!
//! - **Transport Agnostic**: reqwest over HTTP natively and in the browser, or any custom transport
//! - **Interface Checked**: calls and replies are validated against the canister's IDL as a Tower layer
//! - **Ordered Display**: a late reply never overwrites the reply to a newer click
//! - **Browser Ready**: the `wasm` feature binds the form through `web-sys`
//!
//! ## Example
//!
//! ```rust,no_run
//! use communitea_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let canister_id = "rrkah-fqaaa-aaaaa-aaaaq-cai".parse()?;
//!     let client = GreetingClient::initialize(GreetingConfig::new(canister_id))?;
//!
//!     let page = MemoryDocument::new()
//!         .with_input("name", "World")
//!         .with_text("greeting", "");
//!     client.handle_click(&page).await?;
//!
//!     println!("{}", page.text("greeting").unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod agent;
pub mod client;
pub mod codec;
pub mod layer;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod ui;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
use wasm_bindgen::prelude::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        actor::{Actor, CommuniteaActor},
        agent::{Agent, AgentBuilder, AgentConfig},
        client::{ClickError, ClickOutcome, GreetingClient, GreetingConfig},
        protocol::{AgentError, CallMode, CanisterId, IdlType, InterfaceDescription},
        ui::{Document, DomIds, MemoryDocument, UiError},
    };
}

/// WASM entry point: bind the greeting form once the module loads
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    ui::web::mount()
}
