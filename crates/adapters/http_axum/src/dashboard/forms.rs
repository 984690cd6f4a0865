//! Debug form endpoints: change a state or fire an event from the root page.

use axum::extract::State;
use serde::Deserialize;

use statehub_app::ports::{EventBus, StateStore};
use statehub_domain::event::parse_event_data;
use statehub_domain::state::Attributes;

use super::home::{OverviewTemplate, overview};
use crate::auth::AuthorizedForm;
use crate::error::ApiError;
use crate::state::AppState;

/// Form body of `/change_state`.
#[derive(Debug, Deserialize)]
pub struct ChangeStateForm {
    pub category: Option<String>,
    pub new_state: Option<String>,
}

/// Form body of `/fire_event`.
#[derive(Debug, Deserialize)]
pub struct FireEventForm {
    pub event_type: Option<String>,
    pub event_data: Option<String>,
}

/// `POST /change_state`
pub async fn change_state<S, B>(
    State(state): State<AppState<S, B>>,
    AuthorizedForm(form): AuthorizedForm<ChangeStateForm>,
) -> Result<OverviewTemplate, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let category = form.category.ok_or(ApiError::MissingField("category"))?;
    let new_state = form.new_state.ok_or(ApiError::MissingField("new_state"))?;

    state
        .states
        .set_state(&category, &new_state, Attributes::new())
        .await?;

    overview(&state).await
}

/// `POST /fire_event`
pub async fn fire_event<S, B>(
    State(state): State<AppState<S, B>>,
    AuthorizedForm(form): AuthorizedForm<FireEventForm>,
) -> Result<OverviewTemplate, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let event_type = form.event_type.ok_or(ApiError::MissingField("event_type"))?;
    let data = parse_event_data(form.event_data.as_deref().unwrap_or_default())?;
    state.bus.fire(&event_type, data).await?;

    overview(&state).await
}

#[cfg(test)]
mod tests {
    use crate::test_support::{FORM, PASSWORD, TestApp, WAIT};
    use axum::http::StatusCode;
    use serde_json::json;
    use statehub_app::ports::{EventBus, StateStore, listener};
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test]
    async fn should_change_state_from_debug_form() {
        let app = TestApp::new();
        app.seed("test.test", "not_to_be_set_state").await;

        let resp = app
            .post_form(
                "/change_state",
                &[
                    ("category", "test.test"),
                    ("new_state", "debug_state_change2"),
                    ("api_password", PASSWORD),
                ],
            )
            .await;

        assert_eq!(resp.status, StatusCode::OK);
        let stored = app.ctx.states.get_state("test.test").await.unwrap().unwrap();
        assert_eq!(stored.state, "debug_state_change2");
        assert!(resp.body.contains("debug_state_change2"));
    }

    #[tokio::test]
    async fn should_reject_debug_change_without_password() {
        let app = TestApp::new();

        let resp = app
            .post_form(
                "/change_state",
                &[("category", "test.test"), ("new_state", "nope")],
            )
            .await;

        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert!(app.ctx.states.get_state("test.test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_fire_event_from_debug_form() {
        let app = TestApp::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.ctx
            .bus
            .listen_once(
                "test_event_with_data",
                listener(move |event| {
                    tx.send(event.data.clone())?;
                    Ok(())
                }),
            )
            .unwrap();

        let resp = app
            .post_form(
                "/fire_event",
                &[
                    ("event_type", "test_event_with_data"),
                    ("event_data", r#"{"test": 1}"#),
                    ("api_password", PASSWORD),
                ],
            )
            .await;

        assert_eq!(resp.status, StatusCode::OK);
        let data = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(data["test"], json!(1));
    }

    #[tokio::test]
    async fn should_reject_malformed_debug_payload() {
        let app = TestApp::new();

        let resp = app
            .post_form(
                "/fire_event",
                &[
                    ("event_type", "whatever"),
                    ("event_data", "{broken"),
                    ("api_password", PASSWORD),
                ],
            )
            .await;

        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn should_answer_401_to_unauthenticated_duplicate_fields() {
        let app = TestApp::new();

        let resp = app
            .request(
                "POST",
                "/change_state",
                Some(FORM),
                "category=a&category=b&new_state=x",
            )
            .await;

        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_reject_duplicate_fields_once_authenticated() {
        let app = TestApp::new();

        let resp = app
            .request(
                "POST",
                "/change_state",
                Some(FORM),
                format!("category=a&category=b&new_state=x&api_password={PASSWORD}"),
            )
            .await;

        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(app.ctx.states.categories().await.unwrap().is_empty());
    }
}
