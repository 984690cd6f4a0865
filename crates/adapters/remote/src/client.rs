//! Thin HTTP client for the statehub wire contract.

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// Port assumed when a host is given without one.
pub const DEFAULT_PORT: u16 = 8123;

/// Authenticated client for one remote hub.
#[derive(Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: Url,
    api_password: String,
}

impl HubClient {
    /// Create a client for `host` (`name`, `name:port`, or a full
    /// `http(s)://` URL) authenticating with `api_password`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidAddress`] when `host` does not form a
    /// usable base URL.
    pub fn new(host: &str, api_password: impl Into<String>) -> Result<Self, RemoteError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url(host)?,
            api_password: api_password.into(),
        })
    }

    /// The URL every request path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::InvalidAddress(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authenticated `GET` of the path made of `segments`.
    pub(crate) async fn get(&self, segments: &[&str]) -> Result<Response, RemoteError> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "remote GET");
        self.http
            .get(url)
            .query(&[("api_password", self.api_password.as_str())])
            .send()
            .await
            .map_err(RemoteError::Network)
    }

    /// Authenticated form `POST` to the path made of `segments`.
    pub(crate) async fn post_form(
        &self,
        segments: &[&str],
        form: &[(&str, &str)],
    ) -> Result<Response, RemoteError> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "remote POST");
        self.http
            .post(url)
            .query(&[("api_password", self.api_password.as_str())])
            .form(form)
            .send()
            .await
            .map_err(RemoteError::Network)
    }
}

/// Turn a non-success answer into [`RemoteError::Status`].
pub(crate) async fn ensure_success(resp: Response) -> Result<Response, RemoteError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(status = %status, body = %body, "remote hub rejected request");
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Decode a JSON body from a successful answer.
pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, RemoteError> {
    ensure_success(resp)
        .await?
        .json::<T>()
        .await
        .map_err(RemoteError::Decode)
}

/// Whether the remote reported the request as unprocessable.
pub(crate) fn is_unprocessable(resp: &Response) -> bool {
    resp.status() == StatusCode::UNPROCESSABLE_ENTITY
}

fn base_url(host: &str) -> Result<Url, RemoteError> {
    let invalid = || RemoteError::InvalidAddress(host.to_string());

    if host.contains("://") {
        return Url::parse(host).map_err(|_| invalid());
    }

    let mut url = Url::parse(&format!("http://{host}")).map_err(|_| invalid())?;
    let explicit_port = host
        .rsplit_once(':')
        .is_some_and(|(_, port)| port.parse::<u16>().is_ok());
    if !explicit_port {
        url.set_port(Some(DEFAULT_PORT)).map_err(|()| invalid())?;
    }
    Ok(url)
}
