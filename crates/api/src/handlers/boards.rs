//! Handlers for the `/boards` resource.

use agencia_core::kanban::{group_into_columns, Column};
use agencia_core::types::DbId;
use agencia_db::models::board::{Board, CreateBoard, UpdateBoard};
use agencia_db::models::task::Task;
use agencia_db::repositories::{BoardRepo, TaskRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A board with its tasks laid out in the four status columns.
#[derive(Debug, Serialize)]
pub struct BoardView {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<Column<Task>>,
}

/// GET /api/boards
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Board>>>> {
    let boards = BoardRepo::list(&state.pool, auth.agency_id).await?;
    Ok(Json(DataResponse { data: boards }))
}

/// POST /api/boards
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBoard>,
) -> AppResult<(StatusCode, Json<Board>)> {
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    let board = BoardRepo::create(&state.pool, auth.agency_id, &input).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /api/boards/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BoardView>> {
    let board = BoardRepo::find_by_id(&state.pool, auth.agency_id, id)
        .await?
        .ok_or(AppError::not_found("Board", id))?;
    let tasks = TaskRepo::list_by_board(&state.pool, auth.agency_id, id).await?;
    Ok(Json(BoardView {
        board,
        columns: group_into_columns(tasks),
    }))
}

/// PUT /api/boards/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateBoard>,
) -> AppResult<Json<Board>> {
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    let board = BoardRepo::update(&state.pool, auth.agency_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Board", id))?;
    Ok(Json(board))
}

/// DELETE /api/boards/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BoardRepo::delete(&state.pool, auth.agency_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Board", id))
    }
}
