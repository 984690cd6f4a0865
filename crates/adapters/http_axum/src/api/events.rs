//! JSON handlers for events.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use statehub_app::ports::{EventBus, StateStore};
use statehub_domain::event::parse_event_data;

use crate::auth::{Authorized, AuthorizedForm};
use crate::error::ApiError;
use crate::state::AppState;

/// Form body for firing an event.
#[derive(Debug, Deserialize)]
pub struct FireEventForm {
    /// JSON object payload, as text.
    pub event_data: Option<String>,
}

/// Body of the listener overview.
#[derive(Debug, Serialize)]
pub struct ListenersBody {
    pub listeners: BTreeMap<String, usize>,
}

/// Body acknowledging a fired event.
#[derive(Debug, Serialize)]
pub struct FiredBody {
    pub message: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<ListenersBody>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the fire endpoint.
pub enum FireResponse {
    Fired(Json<FiredBody>),
}

impl IntoResponse for FireResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Fired(json) => json.into_response(),
        }
    }
}

/// `GET /api/events`: listener count per event type.
pub async fn list<S, B>(
    State(state): State<AppState<S, B>>,
    _auth: Authorized,
) -> Result<ListResponse, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let listeners = state.bus.listeners().await?;
    Ok(ListResponse::Ok(Json(ListenersBody { listeners })))
}

/// `POST /api/events/{event_type}`: fire an event.
///
/// The payload is decoded before the bus is touched; a malformed payload
/// never fires anything.
pub async fn fire<S, B>(
    State(state): State<AppState<S, B>>,
    Path(event_type): Path<String>,
    AuthorizedForm(form): AuthorizedForm<FireEventForm>,
) -> Result<FireResponse, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let data = parse_event_data(form.event_data.as_deref().unwrap_or_default())?;
    state.bus.fire(&event_type, data).await?;

    Ok(FireResponse::Fired(Json(FiredBody {
        message: format!("Event {event_type} fired."),
    })))
}
