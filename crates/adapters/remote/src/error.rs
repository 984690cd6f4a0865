//! Remote adapter error types.

use statehub_domain::error::HubError;

/// Errors specific to talking to a remote hub.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The configured host does not form a usable base URL.
    #[error("invalid remote address {0}")]
    InvalidAddress(String),

    /// The request never got an HTTP answer (refused, reset, DNS, …).
    #[error("failed to reach remote hub")]
    Network(#[source] reqwest::Error),

    /// The remote answered with an unexpected status.
    #[error("remote hub answered {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote answered with a body that does not match the contract.
    #[error("failed to decode remote response")]
    Decode(#[source] reqwest::Error),
}

impl From<RemoteError> for HubError {
    fn from(err: RemoteError) -> Self {
        HubError::Remote(Box::new(err))
    }
}
