//! Handlers for the `/projects` resource.

use agencia_core::pagination::{Page, PageParams};
use agencia_core::types::DbId;
use agencia_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use agencia_db::repositories::ProjectRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::ensure_client;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/projects
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<Page<Project>>> {
    let page = page.clamp();
    let (rows, total) = ProjectRepo::list(&state.pool, auth.agency_id, &filter, page).await?;
    Ok(Json(paged(rows, total, page)))
}

/// POST /api/projects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    ensure_client(&state.pool, auth.agency_id, Some(input.client_id)).await?;
    let project = ProjectRepo::create(&state.pool, auth.agency_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, auth.agency_id, id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    ensure_client(&state.pool, auth.agency_id, input.client_id).await?;
    let project = ProjectRepo::update(&state.pool, auth.agency_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, auth.agency_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}
