//! State store proxy for a remote hub.

use reqwest::StatusCode;
use serde::Deserialize;

use statehub_app::ports::{StateStore, WriteOutcome};
use statehub_domain::error::{HubError, PayloadError};
use statehub_domain::state::{Attributes, State};

use crate::client::{HubClient, decode, ensure_success, is_unprocessable};
use crate::error::RemoteError;

#[derive(Deserialize)]
struct CategoriesBody {
    categories: Vec<String>,
}

/// [`StateStore`] backed by a remote hub's `/api/states` endpoints.
#[derive(Clone)]
pub struct RemoteStateStore {
    client: HubClient,
}

impl RemoteStateStore {
    /// Proxy the store of the hub at `host`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Remote`] when `host` is not a usable address.
    pub fn new(host: &str, api_password: impl Into<String>) -> Result<Self, HubError> {
        Ok(Self::with_client(HubClient::new(host, api_password)?))
    }

    /// Proxy the store behind an existing client.
    #[must_use]
    pub fn with_client(client: HubClient) -> Self {
        Self { client }
    }
}

impl StateStore for RemoteStateStore {
    async fn set_state(
        &self,
        category: &str,
        value: &str,
        attributes: Attributes,
    ) -> Result<WriteOutcome, HubError> {
        let attributes = serde_json::to_string(&attributes).map_err(PayloadError::InvalidJson)?;
        let resp = self
            .client
            .post_form(
                &["api", "states", category],
                &[("new_state", value), ("attributes", attributes.as_str())],
            )
            .await?;

        let created = resp.status() == StatusCode::CREATED;
        let state: State = decode(resp).await?;
        tracing::debug!(category, value, created, "remote state written");
        Ok(if created {
            WriteOutcome::Created(state)
        } else {
            WriteOutcome::Updated(state)
        })
    }

    async fn get_state(&self, category: &str) -> Result<Option<State>, HubError> {
        let resp = self.client.get(&["api", "states", category]).await?;
        if is_unprocessable(&resp) {
            return Ok(None);
        }
        let state = ensure_success(resp)
            .await?
            .json::<State>()
            .await
            .map_err(RemoteError::Decode)?;
        Ok(Some(state))
    }

    async fn categories(&self) -> Result<Vec<String>, HubError> {
        let resp = self.client.get(&["api", "states"]).await?;
        let body: CategoriesBody = decode(resp).await?;
        Ok(body.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_not_mistake_unreachable_hub_for_missing_category() {
        let store = RemoteStateStore::new("127.0.0.1:1", "pw").unwrap();

        let result = store.get_state("livingroom.light").await;

        assert!(matches!(result, Err(HubError::Remote(_))));
    }

    #[tokio::test]
    async fn should_surface_unreachable_hub_on_write() {
        let store = RemoteStateStore::new("127.0.0.1:1", "pw").unwrap();

        let result = store
            .set_state("livingroom.light", "on", Attributes::new())
            .await;

        assert!(matches!(result, Err(HubError::Remote(_))));
    }

    #[test]
    fn should_reject_invalid_host() {
        assert!(matches!(
            RemoteStateStore::new("http://", "pw"),
            Err(HubError::Remote(_))
        ));
    }
}
