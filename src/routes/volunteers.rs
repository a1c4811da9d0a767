use super::db_failure;
use crate::error::AppError;
use crate::models::{CreatedId, NewVolunteer, VolunteerRow, VolunteerUpdate};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/volunteers",
    responses(
        (status = 200, description = "All volunteers, ordered by id", body = [VolunteerRow]),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_volunteers(State(state): State<AppState>) -> Result<Json<Vec<VolunteerRow>>, AppError> {
    let rows = state
        .store
        .display_volunteer_table()
        .await
        .map_err(db_failure("display_volunteer_table"))?;
    Ok(Json(rows))
}

/// Create a volunteer, mapped to a recipient when `recipient_id` is given
#[utoipa::path(
    post,
    path = "/volunteers",
    request_body = NewVolunteer,
    responses(
        (status = 201, description = "Volunteer created", body = CreatedId),
        (status = 500, description = "Database error, e.g. unknown recipient")
    )
)]
#[tracing::instrument(skip(state, volunteer), fields(recipient_id = ?volunteer.recipient_id))]
pub async fn create_volunteer(
    State(state): State<AppState>,
    Json(volunteer): Json<NewVolunteer>,
) -> Result<(StatusCode, Json<CreatedId>), AppError> {
    let id = state
        .store
        .insert_volunteer(volunteer)
        .await
        .map_err(db_failure("insert_volunteer"))?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

#[utoipa::path(
    put,
    path = "/volunteers/{id}",
    params(("id" = i32, Path, description = "Volunteer id")),
    request_body = VolunteerUpdate,
    responses(
        (status = 204, description = "Updated, or no such volunteer"),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state, update))]
pub async fn update_volunteer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<VolunteerUpdate>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .update_volunteer(id, update)
        .await
        .map_err(db_failure("update_volunteer"))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/volunteers/{id}",
    params(("id" = i32, Path, description = "Volunteer id")),
    responses(
        (status = 204, description = "Deleted, or no such volunteer"),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_volunteer(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_volunteer(id)
        .await
        .map_err(db_failure("delete_volunteer"))?;
    Ok(StatusCode::NO_CONTENT)
}
