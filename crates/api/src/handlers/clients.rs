//! Handlers for the `/clients` resource.

use agencia_core::pagination::{Page, PageParams};
use agencia_core::types::DbId;
use agencia_db::models::client::{Client, ClientFilter, CreateClient, UpdateClient};
use agencia_db::repositories::ClientRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/clients
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<ClientFilter>,
) -> AppResult<Json<Page<Client>>> {
    let page = page.clamp();
    let (rows, total) = ClientRepo::list(&state.pool, auth.agency_id, &filter, page).await?;
    Ok(Json(paged(rows, total, page)))
}

/// POST /api/clients
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = ClientRepo::create(&state.pool, auth.agency_id, &input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::find_by_id(&state.pool, auth.agency_id, id)
        .await?
        .ok_or(AppError::not_found("Client", id))?;
    Ok(Json(client))
}

/// PUT /api/clients/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateClient>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::update(&state.pool, auth.agency_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Client", id))?;
    Ok(Json(client))
}

/// DELETE /api/clients/{id}
///
/// A client that still has projects is refused with 409 by the
/// `projects.client_id` foreign key.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ClientRepo::delete(&state.pool, auth.agency_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Client", id))
    }
}
