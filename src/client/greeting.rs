//! The greeting click handler

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};

use thiserror::Error;

use crate::{
    actor::CommuniteaActor,
    agent::AgentBuilder,
    client::config::GreetingConfig,
    protocol::error::AgentError,
    transport::{HttpTransport, Transport},
    ui::{Document, DomIds, UiError},
};

/// What a handled click did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The greeting was written to the output element
    Rendered {
        /// Sequence number of the click
        seq: u64,

        /// The text written
        greeting: String,
    },

    /// A reply to a later click was already on screen, so this one was dropped
    Superseded {
        /// Sequence number of the click
        seq: u64,

        /// Sequence number of the click currently displayed
        displayed: u64,
    },
}

/// Why a click produced no greeting
#[derive(Debug, Error)]
pub enum ClickError {
    /// The page could not be read or written
    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    /// The remote call failed
    #[error("Remote call failed: {0}")]
    Call(#[from] AgentError),
}

/// Bridges clicks on the greeting form to `greet` calls
///
/// The agent and actor are created once, when the client is, and shared by
/// every click. Clicks may overlap; each takes the next sequence number and
/// a reply is only displayed if no later click's reply is already showing.
pub struct GreetingClient<T> {
    actor: Arc<CommuniteaActor<T>>,
    ids: DomIds,
    issued: AtomicU64,
    displayed: Mutex<u64>,
}

impl GreetingClient<HttpTransport> {
    /// Build the agent and actor over HTTP
    ///
    /// Nothing is sent until the first click.
    pub fn initialize(config: GreetingConfig) -> Result<Self, AgentError> {
        let agent = AgentBuilder::new(config.agent).build_http()?;
        let actor = CommuniteaActor::new(agent, config.canister_id);

        tracing::info!(canister = %actor.actor().canister_id(), "greeting client ready");
        Ok(Self::new(actor).with_ids(config.ids))
    }
}

impl<T> GreetingClient<T>
where
    T: Transport,
{
    /// Wrap an existing actor, using the default element ids
    pub fn new(actor: impl Into<Arc<CommuniteaActor<T>>>) -> Self {
        Self {
            actor: actor.into(),
            ids: DomIds::default(),
            issued: AtomicU64::new(0),
            displayed: Mutex::new(0),
        }
    }

    /// Use different element ids
    pub fn with_ids(mut self, ids: DomIds) -> Self {
        self.ids = ids;
        self
    }

    /// The actor shared by all clicks
    pub fn actor(&self) -> &Arc<CommuniteaActor<T>> {
        &self.actor
    }

    /// Element ids of the form
    pub fn ids(&self) -> &DomIds {
        &self.ids
    }

    /// Handle one click: read the name, call `greet`, display the reply
    ///
    /// The input is sent as-is, empty or not. On failure the output element
    /// is left untouched.
    pub async fn handle_click<D>(&self, document: &D) -> Result<ClickOutcome, ClickError>
    where
        D: Document + ?Sized,
    {
        let name = document.input_value(&self.ids.input)?;
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!(seq, "greeting requested");
        let greeting = self.actor.greet(&name).await?;

        let mut displayed = self.displayed.lock().unwrap_or_else(PoisonError::into_inner);
        if seq < *displayed {
            tracing::debug!(seq, displayed = *displayed, "dropping stale greeting");
            return Ok(ClickOutcome::Superseded {
                seq,
                displayed: *displayed,
            });
        }

        document.set_text(&self.ids.output, &greeting)?;
        *displayed = seq;

        Ok(ClickOutcome::Rendered { seq, greeting })
    }
}

impl<T> std::fmt::Debug for GreetingClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreetingClient")
            .field("actor", &self.actor)
            .field("ids", &self.ids)
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .finish()
    }
}
