//! Event: an immutable record of something that happened.
//!
//! Events are fired on an event bus and handed to every listener whose
//! registration matches the event type or the [`MATCH_ALL`] wildcard.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::time::{Timestamp, now};

/// Event payload: a JSON object.
pub type EventData = serde_json::Map<String, serde_json::Value>;

/// Registration key that matches every fired event.
pub const MATCH_ALL: &str = "*";

/// Fired by a state store whenever a category's value changes.
pub const EVENT_STATE_CHANGED: &str = "state_changed";

/// Fired once by the daemon when it starts serving.
pub const EVENT_HUB_START: &str = "hub_start";

/// A named occurrence with an optional structured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    pub data: EventData,
    pub fired_at: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: EventData) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            fired_at: now(),
        }
    }

    /// Whether a listener registered under `key` should receive this event.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        key == MATCH_ALL || key == self.event_type
    }
}

/// Decode the textual event payload carried over the wire.
///
/// An empty string is treated as "no data".
///
/// # Errors
///
/// Returns [`PayloadError::InvalidJson`] when `raw` is not JSON and
/// [`PayloadError::NotAnObject`] when it is JSON but not an object.
pub fn parse_event_data(raw: &str) -> Result<EventData, PayloadError> {
    if raw.trim().is_empty() {
        return Ok(EventData::new());
    }
    match serde_json::from_str(raw).map_err(PayloadError::InvalidJson)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(PayloadError::NotAnObject),
    }
}
