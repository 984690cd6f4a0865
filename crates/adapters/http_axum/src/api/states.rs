//! JSON handlers for category states.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use statehub_app::ports::{EventBus, StateStore, WriteOutcome};
use statehub_domain::error::{HubError, UnknownCategoryError};
use statehub_domain::state::{State as Snapshot, parse_attributes};

use crate::auth::{Authorized, AuthorizedForm};
use crate::error::ApiError;
use crate::state::AppState;

/// Form body for writing a state.
#[derive(Debug, Deserialize)]
pub struct SetStateForm {
    pub new_state: Option<String>,
    /// JSON object of attributes, as text.
    pub attributes: Option<String>,
}

/// Body of the list endpoint.
#[derive(Debug, Serialize)]
pub struct CategoriesBody {
    pub categories: Vec<String>,
    pub states: Vec<Snapshot>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<CategoriesBody>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Snapshot>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the set endpoint.
pub enum SetResponse {
    Created(Json<Snapshot>),
    Updated(Json<Snapshot>),
}

impl From<WriteOutcome> for SetResponse {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Created(state) => Self::Created(Json(state)),
            WriteOutcome::Updated(state) => Self::Updated(Json(state)),
        }
    }
}

impl IntoResponse for SetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Updated(json) => json.into_response(),
        }
    }
}

/// `GET /api/states`
pub async fn list<S, B>(
    State(state): State<AppState<S, B>>,
    _auth: Authorized,
) -> Result<ListResponse, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let categories = state.states.categories().await?;
    let mut states = Vec::with_capacity(categories.len());
    for category in &categories {
        if let Some(snapshot) = state.states.get_state(category).await? {
            states.push(snapshot);
        }
    }
    Ok(ListResponse::Ok(Json(CategoriesBody { categories, states })))
}

/// `GET /api/states/{category}`
pub async fn get<S, B>(
    State(state): State<AppState<S, B>>,
    Path(category): Path<String>,
    _auth: Authorized,
) -> Result<GetResponse, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let snapshot = state
        .states
        .get_state(&category)
        .await?
        .ok_or_else(|| HubError::from(UnknownCategoryError { category }))?;
    Ok(GetResponse::Ok(Json(snapshot)))
}

/// `POST /api/states/{category}`
pub async fn set<S, B>(
    State(state): State<AppState<S, B>>,
    Path(category): Path<String>,
    AuthorizedForm(form): AuthorizedForm<SetStateForm>,
) -> Result<SetResponse, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let new_state = form.new_state.ok_or(ApiError::MissingField("new_state"))?;
    let attributes = parse_attributes(form.attributes.as_deref().unwrap_or_default())?;

    let outcome = state
        .states
        .set_state(&category, &new_state, attributes)
        .await?;
    Ok(outcome.into())
}
