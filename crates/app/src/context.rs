//! Explicit hub context: one local bus and the store bound to it.
//!
//! Created once by the composition root (or a test harness) and passed by
//! reference to everything that needs the bus or the store.

use std::sync::Arc;

use crate::event_bus::LocalEventBus;
use crate::state_store::LocalStateStore;

/// Store type owned by a [`HubContext`].
pub type LocalHubStore = LocalStateStore<Arc<LocalEventBus>>;

/// Shared handles to the authoritative bus and store of this process.
#[derive(Clone)]
pub struct HubContext {
    /// The in-process event bus.
    pub bus: Arc<LocalEventBus>,
    /// The category store announcing on [`bus`](Self::bus).
    pub states: Arc<LocalHubStore>,
}

impl HubContext {
    /// Create a fresh bus and a store bound to it.
    #[must_use]
    pub fn new() -> Self {
        let bus = Arc::new(LocalEventBus::new());
        let states = Arc::new(LocalStateStore::new(Arc::clone(&bus)));
        Self { bus, states }
    }
}

impl Default for HubContext {
    fn default() -> Self {
        Self::new()
    }
}
