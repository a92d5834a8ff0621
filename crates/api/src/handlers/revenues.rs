//! Handlers for the `/revenues` resource.

use agencia_core::pagination::{Page, PageParams};
use agencia_core::types::DbId;
use agencia_db::models::revenue::{CreateRevenue, RevenueFilter, Revenue, UpdateRevenue};
use agencia_db::repositories::RevenueRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::{ensure_client, ensure_project};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/revenues
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<RevenueFilter>,
) -> AppResult<Json<Page<Revenue>>> {
    let page = page.clamp();
    let (rows, total) = RevenueRepo::list(&state.pool, auth.agency_id, &filter, page).await?;
    Ok(Json(paged(rows, total, page)))
}

/// POST /api/revenues
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateRevenue>,
) -> AppResult<(StatusCode, Json<Revenue>)> {
    ensure_client(&state.pool, auth.agency_id, input.client_id).await?;
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    let row = RevenueRepo::create(&state.pool, auth.agency_id, &input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/revenues/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Revenue>> {
    let row = RevenueRepo::find_by_id(&state.pool, auth.agency_id, id)
        .await?
        .ok_or(AppError::not_found("Revenue", id))?;
    Ok(Json(row))
}

/// PUT /api/revenues/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateRevenue>,
) -> AppResult<Json<Revenue>> {
    ensure_client(&state.pool, auth.agency_id, input.client_id).await?;
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    let row = RevenueRepo::update(&state.pool, auth.agency_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Revenue", id))?;
    Ok(Json(row))
}

/// DELETE /api/revenues/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RevenueRepo::delete(&state.pool, auth.agency_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Revenue", id))
    }
}
