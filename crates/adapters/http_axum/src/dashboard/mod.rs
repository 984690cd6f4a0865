//! Server-side rendered debug page and its form endpoints (no JavaScript).
//!
//! The root page doubles as a login check: without a valid password it only
//! shows a login form. The debug forms POST back and answer with the
//! refreshed page.

#[allow(clippy::missing_errors_doc)]
pub mod forms;
#[allow(clippy::missing_errors_doc)]
pub mod home;

use askama::Template;
use axum::Router;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use statehub_app::ports::{EventBus, StateStore};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the dashboard sub-router.
pub fn routes<S, B>() -> Router<AppState<S, B>>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    Router::new()
        .route("/", get(home::index::<S, B>))
        .route("/change_state", post(forms::change_state::<S, B>))
        .route("/fire_event", post(forms::fire_event::<S, B>))
}

/// Render `template` as an HTML response, or a 500 when rendering fails.
fn render(template: &impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
