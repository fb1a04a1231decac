use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::routes::extract::JsonBody;
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

impl CredentialsRequest {
    /// Both fields, or a 400 if either is missing or empty.
    fn required(self) -> Result<(String, String), AppError> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err(AppError::bad_request("username and password are required")),
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (username, password) = payload.required()?;

    let Some(user_id) = state.users.authenticate(&username, &password).await else {
        tracing::warn!(%username, "login rejected");
        return Err(AppError::unauthorized("invalid credentials"));
    };

    let token = state.tokens.issue(user_id).map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!(user_id, "login succeeded");
    Ok(Json(LoginResponse { token }))
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (username, password) = payload.required()?;

    let credential = state.users.register(&username, &password).await?;

    tracing::info!(user_id = credential.id, username = %credential.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "user registered successfully",
        }),
    ))
}

/// Tokens are stateless, so there is nothing to invalidate server-side.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "logged out: discard the token on the client",
    })
}
