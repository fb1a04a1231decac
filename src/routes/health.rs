use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    status: u16,
    tasks: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthData> {
    let tasks = state.tasks.read().await.all().len();
    Json(HealthData {
        status: StatusCode::OK.as_u16(),
        tasks,
    })
}
