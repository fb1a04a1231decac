use std::any::Any;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod extract;
pub mod health;
pub mod middleware_auth;
pub mod tasks;

pub use auth::{login, logout, register};
pub use health::health;

use crate::error::AppError;
use crate::state::AppState;

/// `{"message": ...}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Full application router with every layer applied.
pub fn app(state: AppState) -> Router {
    let task_router = Router::new()
        .route("/tasks", get(tasks::routes::list).post(tasks::routes::create))
        .route(
            "/tasks/{id}",
            get(tasks::routes::get)
                .patch(tasks::routes::update)
                .delete(tasks::routes::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .merge(task_router)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::not_found("route not found")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(format!("handler panicked: {detail}")).into_response()
}
