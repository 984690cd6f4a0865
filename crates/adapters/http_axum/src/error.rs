//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use statehub_domain::error::{HubError, PayloadError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or wrong `api_password`.
    Unauthorized,
    /// A required form field was not sent.
    MissingField(&'static str),
    /// The request body could not be read.
    UnreadableBody(String),
    /// The url-encoded body does not fit the endpoint's form.
    MalformedForm(String),
    /// An HTML template failed to render.
    Render(askama::Error),
    /// A store or bus call failed.
    Hub(HubError),
}

impl From<HubError> for ApiError {
    fn from(err: HubError) -> Self {
        Self::Hub(err)
    }
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        Self::Hub(HubError::MalformedPayload(err))
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "invalid api password".to_string()),
            Self::MissingField(field) => (StatusCode::BAD_REQUEST, format!("missing {field}")),
            Self::UnreadableBody(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::MalformedForm(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason.clone()),
            Self::Render(err) => {
                tracing::error!(error = %err, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to render page".to_string(),
                )
            }
            Self::Hub(HubError::UnknownCategory(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            Self::Hub(HubError::MalformedPayload(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            Self::Hub(HubError::Unsupported(err)) => (StatusCode::NOT_IMPLEMENTED, err.to_string()),
            Self::Hub(HubError::Remote(err)) => {
                tracing::error!(error = %err, "upstream hub error");
                (StatusCode::BAD_GATEWAY, "upstream hub unavailable".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
