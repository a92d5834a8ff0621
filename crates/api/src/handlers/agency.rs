//! Handlers for the caller's own agency.

use agencia_db::models::agency::{Agency, UpdateAgency};
use agencia_db::repositories::AgencyRepo;
use axum::extract::State;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::state::AppState;

/// GET /api/agency
pub async fn get(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Agency>> {
    let agency = AgencyRepo::find_by_id(&state.pool, auth.agency_id)
        .await?
        .ok_or(AppError::not_found("Agency", auth.agency_id))?;
    Ok(Json(agency))
}

/// PUT /api/agency
pub async fn update(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateAgency>,
) -> AppResult<Json<Agency>> {
    let agency = AgencyRepo::update(&state.pool, auth.agency_id, &input)
        .await?
        .ok_or(AppError::not_found("Agency", auth.agency_id))?;
    tracing::info!(agency_id = agency.id, user_id = auth.user_id, "Agency settings updated");
    Ok(Json(agency))
}
