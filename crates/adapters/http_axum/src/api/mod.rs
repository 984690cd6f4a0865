//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod states;

use axum::Router;
use axum::routing::{get, post};

use statehub_app::ports::{EventBus, StateStore};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, B>() -> Router<AppState<S, B>>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    Router::new()
        // States
        .route("/states", get(states::list::<S, B>))
        .route(
            "/states/{category}",
            get(states::get::<S, B>).post(states::set::<S, B>),
        )
        // Events
        .route("/events", get(events::list::<S, B>))
        .route("/events/{event_type}", post(events::fire::<S, B>))
}
