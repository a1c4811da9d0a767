use crate::error::AppError;
use crate::models::Role;
use crate::panel::{self, FormInput, FormSpec, Outcome, Panel, PanelView, Section};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PanelQuery {
    /// Donor, Volunteer or Recipient
    role: String,
    /// Create, Read, Update or Delete
    section: String,
}

impl PanelQuery {
    fn panel(&self) -> Result<Panel, AppError> {
        let role = self.role.parse::<Role>().map_err(AppError::InvalidRequest)?;
        let section = self.section.parse::<Section>().map_err(AppError::InvalidRequest)?;
        Ok(Panel::new(role, section))
    }
}

/// Form and table for one role × section branch
#[utoipa::path(
    get,
    path = "/panel",
    params(PanelQuery),
    responses(
        (status = 200, description = "Panel view; load failures are reported in `notice`", body = PanelView),
        (status = 400, description = "Unknown role or section")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn show_panel(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<PanelView>, AppError> {
    let panel = query.panel()?;
    let today = Utc::now().date_naive();
    Ok(Json(panel::render(panel, state.store.as_ref(), today).await))
}

/// Submit the branch's form; the result is always an inline outcome
#[utoipa::path(
    post,
    path = "/panel",
    params(PanelQuery),
    request_body = FormInput,
    responses(
        (status = 200, description = "Success or error message for the submission", body = Outcome),
        (status = 400, description = "Unknown role or section")
    )
)]
#[tracing::instrument(skip(state, input))]
pub async fn submit_panel(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
    Json(input): Json<FormInput>,
) -> Result<Json<Outcome>, AppError> {
    let panel = query.panel()?;
    let now = Utc::now().naive_utc();
    let outcome = panel::submit(panel, &input, state.store.as_ref(), now).await;
    tracing::info!(success = outcome.is_success(), "{}", outcome.message);
    Ok(Json(outcome))
}

/// Sign-up form
#[utoipa::path(
    get,
    path = "/signup",
    responses((status = 200, description = "Sign-up form", body = FormSpec))
)]
pub async fn signup_form() -> Json<FormSpec> {
    Json(panel::signup_form())
}

/// Create an account from the sign-up form
#[utoipa::path(
    post,
    path = "/signup",
    request_body = FormInput,
    responses((status = 200, description = "Success or error message", body = Outcome))
)]
#[tracing::instrument(skip(state, input))]
pub async fn submit_signup(State(state): State<AppState>, Json(input): Json<FormInput>) -> Json<Outcome> {
    Json(panel::submit_signup(&input, state.store.as_ref()).await)
}
