use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use super::dto::{CreateTask, ListQuery, TaskPage, UpdateTask};
use super::{parse_filter, queries};
use crate::error::AppError;
use crate::routes::extract::{JsonBody, TaskId};
use crate::routes::middleware_auth::AuthUser;
use crate::routes::MessageResponse;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Json<TaskPage> {
    // a query string that doesn't even decode is treated as no filters
    let query = match query {
        Ok(Query(q)) => q,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring undecodable list query");
            ListQuery::default()
        }
    };

    let filter = parse_filter(&query);
    let table = state.tasks.read().await;
    Json(queries::list_tasks(&table, &filter))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(body): JsonBody<CreateTask>,
) -> Result<impl IntoResponse, AppError> {
    let task = {
        let mut table = state.tasks.write().await;
        queries::create_task(&mut table, body, Utc::now())?
    };

    tracing::info!(task_id = task.id, user_id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<impl IntoResponse, AppError> {
    let table = state.tasks.read().await;
    queries::get_task(&table, id).map(Json)
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    TaskId(id): TaskId,
    JsonBody(body): JsonBody<UpdateTask>,
) -> Result<impl IntoResponse, AppError> {
    let task = {
        let mut table = state.tasks.write().await;
        queries::update_task(&mut table, id, body, Utc::now())?
    };

    tracing::info!(task_id = task.id, user_id, completed = task.completed, "task updated");
    Ok(Json(task))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    TaskId(id): TaskId,
) -> Result<impl IntoResponse, AppError> {
    queries::delete_task(&mut *state.tasks.write().await, id)?;

    tracing::info!(task_id = id, user_id, "task removed");
    Ok(Json(MessageResponse {
        message: "task removed successfully",
    }))
}
