//! Handlers for the `/tasks` resource.

use agencia_core::pagination::{Page, PageParams};
use agencia_core::types::DbId;
use agencia_db::models::task::{CreateTask, MoveTask, Task, TaskFilter, UpdateTask};
use agencia_db::repositories::{BoardRepo, TaskRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::{ensure_project, ensure_user};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/tasks
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<Json<Page<Task>>> {
    let page = page.clamp();
    let (rows, total) = TaskRepo::list(&state.pool, auth.agency_id, &filter, page).await?;
    Ok(Json(paged(rows, total, page)))
}

/// POST /api/tasks
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    BoardRepo::find_by_id(&state.pool, auth.agency_id, input.board_id)
        .await?
        .ok_or(AppError::not_found("Board", input.board_id))?;
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    ensure_user(&state.pool, auth.agency_id, input.assignee_id).await?;

    let task = TaskRepo::create(&state.pool, auth.agency_id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, auth.agency_id, id)
        .await?
        .ok_or(AppError::not_found("Task", id))?;
    Ok(Json(task))
}

/// PUT /api/tasks/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    ensure_user(&state.pool, auth.agency_id, input.assignee_id).await?;

    let task = TaskRepo::update(&state.pool, auth.agency_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Task", id))?;
    Ok(Json(task))
}

/// PATCH /api/tasks/{id}/move
///
/// The requested position is clamped into the destination column.
pub async fn move_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<MoveTask>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::move_to(&state.pool, auth.agency_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Task", id))?;
    tracing::debug!(task_id = id, status = %task.status, position = task.position, "Task moved");
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TaskRepo::delete(&state.pool, auth.agency_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Task", id))
    }
}
