//! Event bus proxy for a remote hub.

use std::collections::BTreeMap;

use serde::Deserialize;

use statehub_app::ports::{EventBus, Listener};
use statehub_domain::error::{HubError, PayloadError, UnsupportedError};
use statehub_domain::event::EventData;
use statehub_domain::id::ListenerId;

use crate::client::{HubClient, decode, ensure_success};

#[derive(Deserialize)]
struct ListenersBody {
    listeners: BTreeMap<String, usize>,
}

/// [`EventBus`] whose events are fired on a remote hub.
///
/// Listeners registered on the remote hub's own bus receive them. This proxy
/// cannot deliver events to local callbacks, so the registration methods
/// report [`HubError::Unsupported`].
#[derive(Clone)]
pub struct RemoteEventBus {
    client: HubClient,
}

impl RemoteEventBus {
    /// Proxy the bus of the hub at `host`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Remote`] when `host` is not a usable address.
    pub fn new(host: &str, api_password: impl Into<String>) -> Result<Self, HubError> {
        Ok(Self::with_client(HubClient::new(host, api_password)?))
    }

    /// Proxy the bus behind an existing client.
    #[must_use]
    pub fn with_client(client: HubClient) -> Self {
        Self { client }
    }

    fn unsupported(operation: &'static str) -> HubError {
        UnsupportedError {
            operation,
            implementation: "RemoteEventBus",
        }
        .into()
    }
}

impl EventBus for RemoteEventBus {
    fn listen(&self, _event_type: &str, _listener: Listener) -> Result<ListenerId, HubError> {
        Err(Self::unsupported("listen"))
    }

    fn listen_once(&self, _event_type: &str, _listener: Listener) -> Result<ListenerId, HubError> {
        Err(Self::unsupported("listen_once"))
    }

    fn remove_listener(&self, _id: ListenerId) -> Result<bool, HubError> {
        Err(Self::unsupported("remove_listener"))
    }

    async fn fire(&self, event_type: &str, data: EventData) -> Result<(), HubError> {
        let payload = serde_json::to_string(&data).map_err(PayloadError::InvalidJson)?;
        let resp = self
            .client
            .post_form(&["api", "events", event_type], &[("event_data", payload.as_str())])
            .await?;
        ensure_success(resp).await?;
        tracing::debug!(event_type, "remote event fired");
        Ok(())
    }

    async fn listeners(&self) -> Result<BTreeMap<String, usize>, HubError> {
        let resp = self.client.get(&["api", "events"]).await?;
        let body: ListenersBody = decode(resp).await?;
        Ok(body.listeners)
    }
}
