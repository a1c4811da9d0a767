use super::db_failure;
use crate::error::AppError;
use crate::models::{DonorRow, DonorUpdate, NewDonor};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

/// Donors with their total donation
#[utoipa::path(
    get,
    path = "/donors",
    responses(
        (status = 200, description = "All donors, ordered by id", body = [DonorRow]),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_donors(State(state): State<AppState>) -> Result<Json<Vec<DonorRow>>, AppError> {
    let rows = state
        .store
        .display_donor_table()
        .await
        .map_err(db_failure("display_donor_table"))?;
    Ok(Json(rows))
}

/// Create a donor together with their first donation
#[utoipa::path(
    post,
    path = "/donors",
    request_body = NewDonor,
    responses(
        (status = 201, description = "Donor and donation recorded"),
        (status = 400, description = "Negative or non-numeric amount"),
        (status = 500, description = "Database error, e.g. unknown recipient")
    )
)]
#[tracing::instrument(skip(state, donor), fields(donate_to = ?donor.donate_to))]
pub async fn create_donor(State(state): State<AppState>, Json(donor): Json<NewDonor>) -> Result<StatusCode, AppError> {
    if !donor.donation_amount.is_finite() || donor.donation_amount < 0.0 {
        return Err(AppError::InvalidRequest(
            "donation_amount must be zero or more".to_string(),
        ));
    }
    state
        .store
        .insert_donor_with_donation(donor, Utc::now().naive_utc())
        .await
        .map_err(db_failure("insert_donor_with_donation"))?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/donors/{id}",
    params(("id" = i32, Path, description = "Donor id")),
    request_body = DonorUpdate,
    responses(
        (status = 204, description = "Updated, or no such donor"),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state, update))]
pub async fn update_donor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<DonorUpdate>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .update_donor(id, update)
        .await
        .map_err(db_failure("update_donor"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a donor and their donations
#[utoipa::path(
    delete,
    path = "/donors/{id}",
    params(("id" = i32, Path, description = "Donor id")),
    responses(
        (status = 204, description = "Deleted, or no such donor"),
        (status = 500, description = "Database error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_donor(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_donor(id)
        .await
        .map_err(db_failure("delete_donor"))?;
    Ok(StatusCode::NO_CONTENT)
}
