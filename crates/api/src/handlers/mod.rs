pub mod agency;
pub mod auth;
pub mod boards;
pub mod clients;
pub mod dashboard;
pub mod expenses;
pub mod ia;
pub mod instagram;
pub mod projects;
pub mod revenues;
pub mod tasks;
pub mod users;

use agencia_core::types::DbId;
use agencia_db::repositories::{ClientRepo, ProjectRepo, UserRepo};
use agencia_db::DbPool;

use crate::error::{AppError, AppResult};

// Foreign keys alone cannot tell a row of another agency from one of ours,
// so every cross-reference in a request body is resolved in the caller's
// tenant first.

pub(crate) async fn ensure_client(
    pool: &DbPool,
    agency_id: DbId,
    client_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = client_id {
        ClientRepo::find_by_id(pool, agency_id, id)
            .await?
            .ok_or(AppError::not_found("Client", id))?;
    }
    Ok(())
}

pub(crate) async fn ensure_project(
    pool: &DbPool,
    agency_id: DbId,
    project_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = project_id {
        ProjectRepo::find_by_id(pool, agency_id, id)
            .await?
            .ok_or(AppError::not_found("Project", id))?;
    }
    Ok(())
}

pub(crate) async fn ensure_user(
    pool: &DbPool,
    agency_id: DbId,
    user_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = user_id {
        UserRepo::find_by_id(pool, agency_id, id)
            .await?
            .ok_or(AppError::not_found("User", id))?;
    }
    Ok(())
}
