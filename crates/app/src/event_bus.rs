//! In-process event bus with a shared listener registry.

use std::collections::{BTreeMap, HashMap};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use statehub_domain::error::HubError;
use statehub_domain::event::{Event, EventData, MATCH_ALL};
use statehub_domain::id::ListenerId;

use crate::ports::{EventBus, Listener};

struct Registration {
    id: ListenerId,
    once: bool,
    listener: Listener,
}

/// In-process event bus.
///
/// Every matching listener runs as its own task on tokio's blocking pool, so
/// [`fire`](EventBus::fire) returns immediately and a slow or failing listener
/// never holds up the others. One-shot registrations are removed inside the
/// same critical section that selects them for dispatch.
#[derive(Default)]
pub struct LocalEventBus {
    registry: Mutex<HashMap<String, Vec<Registration>>>,
}

impl LocalEventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, Vec<Registration>>> {
        // Callbacks never run under this lock, so a poisoned guard still
        // holds a consistent map.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, event_type: &str, listener: Listener, once: bool) -> ListenerId {
        let id = ListenerId::new();
        self.registry()
            .entry(event_type.to_string())
            .or_default()
            .push(Registration { id, once, listener });
        tracing::debug!(event_type, listener = %id, once, "listener registered");
        id
    }

    /// Select the listeners for `event`, dropping one-shot registrations.
    fn take_matching(&self, event: &Event) -> Vec<(ListenerId, Listener)> {
        let mut registry = self.registry();
        let mut keys = vec![event.event_type.as_str()];
        if event.event_type != MATCH_ALL {
            keys.push(MATCH_ALL);
        }

        let mut targets = Vec::new();
        for key in keys {
            let Some(registrations) = registry.get_mut(key) else {
                continue;
            };
            targets.extend(
                registrations
                    .iter()
                    .map(|reg| (reg.id, Arc::clone(&reg.listener))),
            );
            registrations.retain(|reg| !reg.once);
            if registrations.is_empty() {
                registry.remove(key);
            }
        }
        targets
    }

    fn dispatch(event: Event, targets: Vec<(ListenerId, Listener)>) {
        let event = Arc::new(event);
        for (id, listener) in targets {
            let event = Arc::clone(&event);
            tokio::task::spawn_blocking(move || {
                match catch_unwind(AssertUnwindSafe(|| listener(&event))) {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        tracing::warn!(
                            event_type = %event.event_type,
                            listener = %id,
                            error = %err,
                            "listener failed"
                        );
                    }
                    Err(_) => {
                        tracing::warn!(
                            event_type = %event.event_type,
                            listener = %id,
                            "listener panicked"
                        );
                    }
                }
            });
        }
    }
}

impl EventBus for LocalEventBus {
    fn listen(&self, event_type: &str, listener: Listener) -> Result<ListenerId, HubError> {
        Ok(self.register(event_type, listener, false))
    }

    fn listen_once(&self, event_type: &str, listener: Listener) -> Result<ListenerId, HubError> {
        Ok(self.register(event_type, listener, true))
    }

    fn remove_listener(&self, id: ListenerId) -> Result<bool, HubError> {
        let mut registry = self.registry();
        let mut removed = false;
        registry.retain(|_, registrations| {
            let before = registrations.len();
            registrations.retain(|reg| reg.id != id);
            removed |= registrations.len() != before;
            !registrations.is_empty()
        });
        Ok(removed)
    }

    async fn fire(&self, event_type: &str, data: EventData) -> Result<(), HubError> {
        let event = Event::new(event_type, data);
        let targets = self.take_matching(&event);
        tracing::debug!(event_type, listeners = targets.len(), "firing event");
        Self::dispatch(event, targets);
        Ok(())
    }

    async fn listeners(&self) -> Result<BTreeMap<String, usize>, HubError> {
        Ok(self
            .registry()
            .iter()
            .map(|(event_type, registrations)| (event_type.clone(), registrations.len()))
            .collect())
    }
}
