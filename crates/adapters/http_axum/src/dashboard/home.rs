//! Root page: login form or the state/listener overview.

use askama::Template;
use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};

use statehub_app::ports::{EventBus, StateStore};
use statehub_domain::time::display;

use super::render;
use crate::auth::{credential_in, is_authorized};
use crate::error::ApiError;
use crate::state::AppState;

/// Login form shown to anonymous visitors.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// One line of the states table.
pub struct StateRow {
    category: String,
    state: String,
    last_changed: String,
    attributes: Vec<(String, String)>,
}

/// Authenticated overview: states, listeners and the debug forms.
#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    rows: Vec<StateRow>,
    listeners: Vec<(String, usize)>,
    api_password: String,
}

impl IntoResponse for OverviewTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /`: overview when authenticated, login form otherwise.
pub async fn index<S, B>(
    State(state): State<AppState<S, B>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let candidate = query.and_then(|query| credential_in(query.as_bytes()));
    if is_authorized(state.api_password(), candidate.as_deref()) {
        Ok(overview(&state).await?.into_response())
    } else {
        Ok(LoginTemplate.into_response())
    }
}

/// Collect everything the overview shows.
pub(crate) async fn overview<S, B>(state: &AppState<S, B>) -> Result<OverviewTemplate, ApiError>
where
    S: StateStore + 'static,
    B: EventBus + 'static,
{
    let mut rows = Vec::new();
    for category in state.states.categories().await? {
        let Some(snapshot) = state.states.get_state(&category).await? else {
            continue;
        };
        rows.push(StateRow {
            last_changed: display(&snapshot.last_changed),
            attributes: snapshot
                .attributes
                .iter()
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect(),
            category: snapshot.category,
            state: snapshot.state,
        });
    }

    Ok(OverviewTemplate {
        rows,
        listeners: state.bus.listeners().await?.into_iter().collect(),
        api_password: state.api_password().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{PASSWORD, TestApp};
    use axum::http::StatusCode;
    use statehub_app::ports::{EventBus, StateStore, listener};
    use statehub_domain::state::{AttributeValue, Attributes};

    #[tokio::test]
    async fn should_render_login_form_without_password() {
        let app = TestApp::new();

        let resp = app.get("/").await;

        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Log in"));
        assert!(!resp.body.contains("Change state"));
    }

    #[tokio::test]
    async fn should_render_different_page_when_logged_in() {
        let app = TestApp::new();
        app.seed("livingroom.light", "off").await;

        let anonymous = app.get("/").await;
        let logged_in = app.get(&format!("/?api_password={PASSWORD}")).await;

        assert_eq!(logged_in.status, StatusCode::OK);
        assert_ne!(anonymous.body, logged_in.body);
        assert!(logged_in.body.contains("livingroom.light"));
        assert!(logged_in.body.contains("Fire event"));
    }

    #[tokio::test]
    async fn should_treat_wrong_password_as_anonymous() {
        let app = TestApp::new();

        let resp = app.get("/?api_password=wrong").await;

        assert!(resp.body.contains("Log in"));
    }

    #[tokio::test]
    async fn should_escape_category_names() {
        let app = TestApp::new();
        app.seed("<script>", "on").await;

        let resp = app.get(&format!("/?api_password={PASSWORD}")).await;

        assert!(resp.body.contains("script"));
        assert!(!resp.body.contains("<script>"));
    }

    #[tokio::test]
    async fn should_list_attributes_and_listeners() {
        let app = TestApp::new();
        app.ctx
            .states
            .set_state(
                "sensor.door",
                "closed",
                Attributes::from([("battery".to_string(), AttributeValue::Int(87))]),
            )
            .await
            .unwrap();
        app.ctx.bus.listen("doorbell", listener(|_| Ok(()))).unwrap();

        let resp = app.get(&format!("/?api_password={PASSWORD}")).await;

        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("battery: 87"));
        assert!(resp.body.contains("<td>doorbell</td><td>1</td>"));
        assert!(resp.body.contains(&format!("value=\"{PASSWORD}\"")));
    }
}
