//! Handlers for the `/expenses` resource.

use agencia_core::pagination::{Page, PageParams};
use agencia_core::types::DbId;
use agencia_db::models::expense::{CreateExpense, ExpenseFilter, Expense, UpdateExpense};
use agencia_db::repositories::ExpenseRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::{ensure_client, ensure_project};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/expenses
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<ExpenseFilter>,
) -> AppResult<Json<Page<Expense>>> {
    let page = page.clamp();
    let (rows, total) = ExpenseRepo::list(&state.pool, auth.agency_id, &filter, page).await?;
    Ok(Json(paged(rows, total, page)))
}

/// POST /api/expenses
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateExpense>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    ensure_client(&state.pool, auth.agency_id, input.client_id).await?;
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    let row = ExpenseRepo::create(&state.pool, auth.agency_id, &input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/expenses/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Expense>> {
    let row = ExpenseRepo::find_by_id(&state.pool, auth.agency_id, id)
        .await?
        .ok_or(AppError::not_found("Expense", id))?;
    Ok(Json(row))
}

/// PUT /api/expenses/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateExpense>,
) -> AppResult<Json<Expense>> {
    ensure_client(&state.pool, auth.agency_id, input.client_id).await?;
    ensure_project(&state.pool, auth.agency_id, input.project_id).await?;
    let row = ExpenseRepo::update(&state.pool, auth.agency_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Expense", id))?;
    Ok(Json(row))
}

/// DELETE /api/expenses/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ExpenseRepo::delete(&state.pool, auth.agency_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Expense", id))
    }
}
