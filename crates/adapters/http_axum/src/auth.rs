//! Shared-secret authentication.
//!
//! Callers present `api_password` in the query string or as a field of the
//! url-encoded body, on any method. The query value wins when both are
//! present. The credential is looked up with a lenient pair scan, so a body
//! that is not a valid form for the endpoint still gets a 401 when the
//! password is wrong, never a decoding error.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use statehub_app::ports::{EventBus, StateStore};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the credential field.
pub const CREDENTIAL_FIELD: &str = "api_password";

/// Find the credential among the url-encoded pairs of `raw`.
#[must_use]
pub fn credential_in(raw: &[u8]) -> Option<String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(raw)
        .ok()?
        .into_iter()
        .find_map(|(key, value)| (key == CREDENTIAL_FIELD).then_some(value))
}

/// Pick the credential a request presented, query first.
#[must_use]
pub fn presented(query: Option<&str>, body: &[u8]) -> Option<String> {
    query
        .and_then(|query| credential_in(query.as_bytes()))
        .or_else(|| credential_in(body))
}

/// Whether `candidate` matches the configured secret.
#[must_use]
pub fn is_authorized(expected: &str, candidate: Option<&str>) -> bool {
    candidate.is_some_and(|candidate| candidate == expected)
}

/// Reject the request unless it presented the configured secret.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the credential is missing or wrong.
pub fn authorize(expected: &str, candidate: Option<&str>) -> Result<(), ApiError> {
    if is_authorized(expected, candidate) {
        Ok(())
    } else {
        tracing::debug!(
            presented = candidate.is_some(),
            "rejected request with bad api password"
        );
        Err(ApiError::Unauthorized)
    }
}

/// Url-encoded body decoded only after the request was authenticated.
///
/// An empty or missing body decodes as a form with every field absent, and
/// no `Content-Type` is required.
#[derive(Debug)]
pub struct AuthorizedForm<T>(pub T);

/// Form of endpoints whose only field is the credential.
#[derive(Debug, Default, Deserialize)]
pub struct NoFields {}

/// Authentication guard for endpoints that take no other field.
pub type Authorized = AuthorizedForm<NoFields>;

impl<S, B, T> FromRequest<AppState<S, B>> for AuthorizedForm<T>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState<S, B>) -> Result<Self, Self::Rejection> {
        let query = req.uri().query().map(str::to_owned);
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| ApiError::UnreadableBody(err.body_text()))?;

        authorize(
            state.api_password(),
            presented(query.as_deref(), &body).as_deref(),
        )?;

        serde_urlencoded::from_bytes(&body)
            .map(Self)
            .map_err(|err| ApiError::MalformedForm(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_find_credential_among_other_pairs() {
        assert_eq!(
            credential_in(b"new_state=on&api_password=secret%201").as_deref(),
            Some("secret 1")
        );
    }

    #[test]
    fn should_find_no_credential_in_json_body() {
        assert_eq!(credential_in(br#"{"api_password": "secret"}"#), None);
        assert_eq!(credential_in(b""), None);
    }

    #[test]
    fn should_tolerate_duplicate_fields() {
        assert_eq!(
            credential_in(b"category=a&category=b&api_password=secret").as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn should_prefer_query_over_body() {
        let candidate = presented(Some("api_password=wrong"), b"api_password=secret");
        assert!(authorize("secret", candidate.as_deref()).is_err());
    }

    #[test]
    fn should_fall_back_to_body_credential() {
        let candidate = presented(Some("other=1"), b"api_password=secret");
        assert!(authorize("secret", candidate.as_deref()).is_ok());
    }

    #[test]
    fn should_reject_missing_password() {
        assert!(matches!(
            authorize("secret", presented(None, b"").as_deref()),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn should_reject_wrong_password() {
        assert!(!is_authorized("secret", Some("not the password")));
    }
}
