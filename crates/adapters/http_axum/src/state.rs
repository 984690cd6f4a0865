//! Shared application state for axum handlers.

use std::sync::Arc;

use statehub_app::context::{HubContext, LocalHubStore};
use statehub_app::event_bus::LocalEventBus;
use statehub_app::ports::{EventBus, StateStore};

/// Application state shared across all axum handlers.
///
/// Generic over the store and bus so any implementation of the ports can be
/// served. `Clone` is implemented manually so the underlying types do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<S, B> {
    /// Category store read and written by the API.
    pub states: Arc<S>,
    /// Event bus fired and inspected by the API.
    pub bus: Arc<B>,
    /// Shared secret every request must present.
    api_password: Arc<str>,
}

impl<S, B> Clone for AppState<S, B> {
    fn clone(&self) -> Self {
        Self {
            states: Arc::clone(&self.states),
            bus: Arc::clone(&self.bus),
            api_password: Arc::clone(&self.api_password),
        }
    }
}

impl<S, B> AppState<S, B>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` handles.
    pub fn new(states: Arc<S>, bus: Arc<B>, api_password: impl Into<String>) -> Self {
        Self {
            states,
            bus,
            api_password: Arc::from(api_password.into()),
        }
    }

    /// The shared secret requests are checked against.
    #[must_use]
    pub fn api_password(&self) -> &str {
        &self.api_password
    }
}

impl AppState<LocalHubStore, LocalEventBus> {
    /// Serve the bus and store owned by `ctx`.
    pub fn from_context(ctx: &HubContext, api_password: impl Into<String>) -> Self {
        Self::new(Arc::clone(&ctx.states), Arc::clone(&ctx.bus), api_password)
    }
}
