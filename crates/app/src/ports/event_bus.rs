//! Event bus port: publish/subscribe for named events.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use statehub_domain::error::{BoxError, HubError};
use statehub_domain::event::{Event, EventData};
use statehub_domain::id::ListenerId;

/// Error a listener callback may return; it is logged and otherwise ignored.
pub type ListenerError = BoxError;

/// Outcome of one listener invocation.
pub type ListenerResult = Result<(), ListenerError>;

/// A registered callback.
pub type Listener = Arc<dyn Fn(&Event) -> ListenerResult + Send + Sync>;

/// Wrap a closure into a [`Listener`].
pub fn listener<F>(callback: F) -> Listener
where
    F: Fn(&Event) -> ListenerResult + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Publishes events to registered listeners.
///
/// Registration is synchronous; firing and counting may cross a network
/// boundary and are therefore async.
pub trait EventBus: Send + Sync {
    /// Register a persistent listener for `event_type` (or
    /// [`MATCH_ALL`](statehub_domain::event::MATCH_ALL)).
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Unsupported`] on implementations that cannot
    /// deliver events to local callbacks.
    fn listen(&self, event_type: &str, listener: Listener) -> Result<ListenerId, HubError>;

    /// Register a listener that is invoked at most once, even under
    /// concurrent fires.
    ///
    /// # Errors
    ///
    /// Same as [`listen`](Self::listen).
    fn listen_once(&self, event_type: &str, listener: Listener) -> Result<ListenerId, HubError>;

    /// Unregister a listener. Returns `false` if it was not registered.
    ///
    /// # Errors
    ///
    /// Same as [`listen`](Self::listen).
    fn remove_listener(&self, id: ListenerId) -> Result<bool, HubError>;

    /// Fire an event. Returns once the event is scheduled, not once
    /// listeners have finished.
    fn fire(
        &self,
        event_type: &str,
        data: EventData,
    ) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Number of registered listeners per event type.
    fn listeners(&self) -> impl Future<Output = Result<BTreeMap<String, usize>, HubError>> + Send;
}

impl<T: EventBus> EventBus for Arc<T> {
    fn listen(&self, event_type: &str, listener: Listener) -> Result<ListenerId, HubError> {
        (**self).listen(event_type, listener)
    }

    fn listen_once(&self, event_type: &str, listener: Listener) -> Result<ListenerId, HubError> {
        (**self).listen_once(event_type, listener)
    }

    fn remove_listener(&self, id: ListenerId) -> Result<bool, HubError> {
        (**self).remove_listener(id)
    }

    fn fire(
        &self,
        event_type: &str,
        data: EventData,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).fire(event_type, data)
    }

    fn listeners(&self) -> impl Future<Output = Result<BTreeMap<String, usize>, HubError>> + Send {
        (**self).listeners()
    }
}
