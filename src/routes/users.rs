use super::db_failure;
use crate::error::AppError;
use crate::models::NewUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// Register an account
#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "Account created"),
        (status = 500, description = "Database error, e.g. duplicate username")
    )
)]
#[tracing::instrument(skip(state, user), fields(username = %user.username, role = %user.role))]
pub async fn create_user(State(state): State<AppState>, Json(user): Json<NewUser>) -> Result<StatusCode, AppError> {
    state
        .store
        .sign_up(user)
        .await
        .map_err(db_failure("sign_up"))?;
    Ok(StatusCode::CREATED)
}
