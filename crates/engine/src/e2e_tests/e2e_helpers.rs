//! Test harness: the full router over a fresh in-memory database.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use sheetkeeper_domain::Edge;
use tower::ServiceExt;

use crate::api;
use crate::app::App;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::ports::ClockPort;
use crate::infrastructure::sqlite::SqliteRepositories;

pub struct TestServer {
    pub app: Arc<App>,
    router: Router,
}

impl TestServer {
    pub async fn start() -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 2, 14, 18, 30, 0).unwrap(),
        ));
        let repos = SqliteRepositories::open("sqlite::memory:", clock.clone())
            .await
            .expect("open in-memory database");
        let app = Arc::new(App::from_sqlite(repos, clock));
        let router = api::router(app.clone());
        Self { app, router }
    }

    pub async fn seed_edges(&self, edges: &[Edge]) {
        self.app
            .use_cases
            .edges
            .seed(edges)
            .await
            .expect("seed edges");
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        owner: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(owner) = owner {
            builder = builder.header("X-User-Id", owner);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            location,
            body,
        }
    }

    /// Create a character for `owner` and return its id.
    pub async fn create_character(&self, owner: &str) -> String {
        let response = self
            .send(Method::POST, "/api/characters", Some(owner), None)
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"]
            .as_str()
            .expect("created character has an id")
            .to_string()
    }

    pub async fn get_character(&self, owner: &str, id: &str) -> TestResponse {
        self.send(
            Method::GET,
            &format!("/api/characters/{id}"),
            Some(owner),
            None,
        )
        .await
    }

    pub async fn patch_character(&self, owner: &str, id: &str, patch: Value) -> TestResponse {
        self.send(
            Method::PUT,
            &format!("/api/characters/{id}"),
            Some(owner),
            Some(patch),
        )
        .await
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}
