//! State: the current value of one category.
//!
//! A category is created on its first write and updated on every later one;
//! it is never removed. `last_changed` moves only when the value moves, an
//! attribute-only write keeps the previous timestamp.

mod attribute_value;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use attribute_value::AttributeValue;

use crate::error::PayloadError;
use crate::time::Timestamp;

/// Attributes attached to a state, keyed by name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Snapshot of one category's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub category: String,
    pub state: String,
    pub last_changed: Timestamp,
    #[serde(default)]
    pub attributes: Attributes,
}

impl State {
    /// Create the first state of a category.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        value: impl Into<String>,
        attributes: Attributes,
        at: Timestamp,
    ) -> Self {
        Self {
            category: category.into(),
            state: value.into(),
            last_changed: at,
            attributes,
        }
    }

    /// Apply a write and report whether the value changed.
    ///
    /// Attributes are always replaced; `last_changed` is set to `at` only
    /// when `value` differs from the current value.
    pub fn apply(&mut self, value: String, attributes: Attributes, at: Timestamp) -> bool {
        self.attributes = attributes;
        if self.state == value {
            return false;
        }
        self.state = value;
        self.last_changed = at;
        true
    }
}

/// Decode the textual attributes carried over the wire.
///
/// An empty string is treated as "no attributes".
///
/// # Errors
///
/// Returns [`PayloadError::InvalidJson`] when `raw` is not a JSON object of
/// attribute values and [`PayloadError::NotAnObject`] for other JSON values.
pub fn parse_attributes(raw: &str) -> Result<Attributes, PayloadError> {
    if raw.trim().is_empty() {
        return Ok(Attributes::new());
    }
    let value: serde_json::Value = serde_json::from_str(raw).map_err(PayloadError::InvalidJson)?;
    if !value.is_object() {
        return Err(PayloadError::NotAnObject);
    }
    serde_json::from_value(value).map_err(PayloadError::InvalidJson)
}
