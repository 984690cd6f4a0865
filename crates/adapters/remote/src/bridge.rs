//! Bridge: a local store whose changes are announced on a remote bus.
//!
//! Writes land in this process's category map; the resulting
//! `state_changed` events are fired on the remote hub, where the listeners
//! registered on that hub's own bus receive them.

use statehub_app::state_store::LocalStateStore;
use statehub_domain::error::HubError;

use crate::event_bus::RemoteEventBus;

/// Local state store bound to a [`RemoteEventBus`].
pub type Bridge = LocalStateStore<RemoteEventBus>;

/// Build a [`Bridge`] announcing on the hub at `host`.
///
/// # Errors
///
/// Returns [`HubError::Remote`] when `host` is not a usable address.
pub fn bridge(host: &str, api_password: impl Into<String>) -> Result<Bridge, HubError> {
    Ok(LocalStateStore::new(RemoteEventBus::new(host, api_password)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use statehub_app::ports::StateStore;
    use statehub_domain::state::Attributes;

    #[tokio::test]
    async fn should_report_remote_failure_after_local_write() {
        let bridge = bridge("127.0.0.1:1", "pw").unwrap();

        let result = bridge
            .set_state("livingroom.light", "on", Attributes::new())
            .await;

        assert!(matches!(result, Err(HubError::Remote(_))));
        let stored = bridge.get_state("livingroom.light").await.unwrap().unwrap();
        assert_eq!(stored.state, "on");
    }
}
