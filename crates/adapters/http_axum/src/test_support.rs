//! Helpers for driving the router in unit tests without binding a port.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use statehub_app::context::HubContext;
use statehub_app::ports::StateStore;
use statehub_domain::state::Attributes;

use crate::state::AppState;

pub const PASSWORD: &str = "test1234";
pub const WAIT: Duration = Duration::from_secs(5);
pub const FORM: &str = "application/x-www-form-urlencoded";

pub struct TestApp {
    pub ctx: HubContext,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let ctx = HubContext::new();
        let router = crate::router::build(AppState::from_context(&ctx, PASSWORD));
        Self { ctx, router }
    }

    pub async fn seed(&self, category: &str, value: &str) {
        self.ctx
            .states
            .set_state(category, value, Attributes::new())
            .await
            .unwrap();
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, pairs: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(pairs).unwrap();
        self.request("POST", uri, Some(FORM), body).await
    }

    /// Send `body` as is, with an optional `Content-Type`.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.send(builder.body(body.into()).unwrap()).await
    }
}
