#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use todo_api::config::Config;
use todo_api::routes;
use todo_api::state::AppState;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret";

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
    }
}

/// Router plus the state behind it, each test gets its own stores.
pub fn test_app() -> (Router, AppState) {
    let state = AppState::new(&test_config()).unwrap();
    (routes::app(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub async fn login_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({ "username": "admin", "password": "senha123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}
