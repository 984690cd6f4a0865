//! State store port: keyed category states.

use std::future::Future;
use std::sync::Arc;

use statehub_domain::error::HubError;
use statehub_domain::state::{Attributes, State};

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// The category did not exist before this write.
    Created(State),
    /// The category existed and was overwritten.
    Updated(State),
}

impl WriteOutcome {
    /// The state as stored after the write.
    #[must_use]
    pub fn state(&self) -> &State {
        match self {
            Self::Created(state) | Self::Updated(state) => state,
        }
    }

    /// Consume the outcome, keeping the stored state.
    #[must_use]
    pub fn into_state(self) -> State {
        match self {
            Self::Created(state) | Self::Updated(state) => state,
        }
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Keyed container of category states.
pub trait StateStore: Send + Sync {
    /// Upsert the state of `category`. Unknown categories are created.
    fn set_state(
        &self,
        category: &str,
        value: &str,
        attributes: Attributes,
    ) -> impl Future<Output = Result<WriteOutcome, HubError>> + Send;

    /// Snapshot of a category, `None` if it was never written.
    fn get_state(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Option<State>, HubError>> + Send;

    /// All known categories in first-write order.
    fn categories(&self) -> impl Future<Output = Result<Vec<String>, HubError>> + Send;
}

impl<T: StateStore> StateStore for Arc<T> {
    fn set_state(
        &self,
        category: &str,
        value: &str,
        attributes: Attributes,
    ) -> impl Future<Output = Result<WriteOutcome, HubError>> + Send {
        (**self).set_state(category, value, attributes)
    }

    fn get_state(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Option<State>, HubError>> + Send {
        (**self).get_state(category)
    }

    fn categories(&self) -> impl Future<Output = Result<Vec<String>, HubError>> + Send {
        (**self).categories()
    }
}
