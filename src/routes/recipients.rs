use super::db_failure;
use crate::error::AppError;
use crate::models::{CreatedId, NewRecipient, RecipientRow, RecipientUpdate};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// Recipients with the amount raised from earmarked donations
#[utoipa::path(
    get,
    path = "/recipients",
    responses(
        (status = 200, description = "All recipients, ordered by id", body = [RecipientRow]),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_recipients(State(state): State<AppState>) -> Result<Json<Vec<RecipientRow>>, AppError> {
    let rows = state
        .store
        .display_recipient_table()
        .await
        .map_err(db_failure("display_recipient_table"))?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/recipients",
    request_body = NewRecipient,
    responses(
        (status = 201, description = "Recipient created", body = CreatedId),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state, recipient))]
pub async fn create_recipient(
    State(state): State<AppState>,
    Json(recipient): Json<NewRecipient>,
) -> Result<(StatusCode, Json<CreatedId>), AppError> {
    let id = state
        .store
        .insert_recipient(recipient)
        .await
        .map_err(db_failure("insert_recipient"))?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

#[utoipa::path(
    put,
    path = "/recipients/{id}",
    params(("id" = i32, Path, description = "Recipient id")),
    request_body = RecipientUpdate,
    responses(
        (status = 204, description = "Updated, or no such recipient"),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state, update))]
pub async fn update_recipient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<RecipientUpdate>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .update_recipient(id, update)
        .await
        .map_err(db_failure("update_recipient"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a recipient; donors earmarked for it are detached, volunteer mappings removed
#[utoipa::path(
    delete,
    path = "/recipients/{id}",
    params(("id" = i32, Path, description = "Recipient id")),
    responses(
        (status = 204, description = "Deleted, or no such recipient"),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_recipient(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_recipient(id)
        .await
        .map_err(db_failure("delete_recipient"))?;
    Ok(StatusCode::NO_CONTENT)
}
