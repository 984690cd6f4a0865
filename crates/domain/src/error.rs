//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubError`]
//! via `#[from]` when crossing a port boundary.

/// Boxed error type carried by [`HubError::Remote`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by event bus and state store ports.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// A read targeted a category that has never been written.
    #[error("unknown category")]
    UnknownCategory(#[from] UnknownCategoryError),

    /// Structured event data or attributes could not be decoded.
    #[error("malformed payload")]
    MalformedPayload(#[from] PayloadError),

    /// The operation is not available on this implementation.
    #[error("unsupported operation")]
    Unsupported(#[from] UnsupportedError),

    /// A remote hub could not be reached or answered with garbage.
    #[error("remote hub unavailable")]
    Remote(#[source] BoxError),
}

/// Returned when reading a category that was never written.
#[derive(Debug, thiserror::Error)]
#[error("category {category} does not exist")]
pub struct UnknownCategoryError {
    pub category: String,
}

/// Reasons a structured payload is rejected.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload is not valid JSON.
    #[error("payload is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("payload must be a JSON object")]
    NotAnObject,
}

/// Returned by port implementations that cannot honour an operation.
#[derive(Debug, thiserror::Error)]
#[error("{operation} is not supported by {implementation}")]
pub struct UnsupportedError {
    pub operation: &'static str,
    pub implementation: &'static str,
}
