//! In-process state store bound to an event bus.

use std::collections::HashMap;

use serde_json::json;
use tokio::sync::{Mutex, RwLock};

use statehub_domain::error::HubError;
use statehub_domain::event::{EVENT_STATE_CHANGED, EventData};
use statehub_domain::state::{Attributes, State};
use statehub_domain::time::now;

use crate::ports::{EventBus, StateStore, WriteOutcome};

#[derive(Default)]
struct Categories {
    order: Vec<String>,
    states: HashMap<String, State>,
}

/// Authoritative category map.
///
/// Generic over the bus it announces on, so the same store can drive a
/// local bus or, as a bridge, a remote one. The map lock is released before
/// `state_changed` is handed to the bus, so a slow bus never stalls reads.
/// Announcements go out one at a time, in write order.
pub struct LocalStateStore<B> {
    bus: B,
    categories: RwLock<Categories>,
    announcing: Mutex<()>,
}

impl<B: EventBus> LocalStateStore<B> {
    /// Create an empty store announcing on `bus`.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            categories: RwLock::new(Categories::default()),
            announcing: Mutex::new(()),
        }
    }

    /// The bus this store announces on.
    pub fn bus(&self) -> &B {
        &self.bus
    }
}

fn state_changed_data(category: &str, old: Option<&State>, new: &State) -> EventData {
    let mut data = EventData::new();
    data.insert("category".to_string(), json!(category));
    if let Some(old) = old {
        data.insert("old_state".to_string(), json!(old));
    }
    data.insert("new_state".to_string(), json!(new));
    data
}

impl<B: EventBus> StateStore for LocalStateStore<B> {
    async fn set_state(
        &self,
        category: &str,
        value: &str,
        attributes: Attributes,
    ) -> Result<WriteOutcome, HubError> {
        let mut categories = self.categories.write().await;
        let at = now();

        let (outcome, announcement) = match categories.states.get_mut(category) {
            Some(current) => {
                let previous = current.clone();
                let changed = current.apply(value.to_string(), attributes, at);
                let announcement = if changed {
                    Some(state_changed_data(category, Some(&previous), current))
                } else {
                    None
                };
                (WriteOutcome::Updated(current.clone()), announcement)
            }
            None => {
                let created = State::new(category, value, attributes, at);
                let announcement = state_changed_data(category, None, &created);
                categories.order.push(category.to_string());
                categories
                    .states
                    .insert(category.to_string(), created.clone());
                (WriteOutcome::Created(created), Some(announcement))
            }
        };

        tracing::debug!(
            category,
            value,
            created = outcome.is_created(),
            changed = announcement.is_some(),
            "state written"
        );

        if let Some(data) = announcement {
            // Queue up behind earlier announcements before letting readers in.
            let _turn = self.announcing.lock().await;
            drop(categories);
            self.bus.fire(EVENT_STATE_CHANGED, data).await?;
        }
        Ok(outcome)
    }

    async fn get_state(&self, category: &str) -> Result<Option<State>, HubError> {
        Ok(self.categories.read().await.states.get(category).cloned())
    }

    async fn categories(&self) -> Result<Vec<String>, HubError> {
        Ok(self.categories.read().await.order.clone())
    }
}
