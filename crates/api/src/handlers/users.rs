//! Handlers for agency members.

use agencia_core::error::CoreError;
use agencia_core::roles::{ROLE_MEMBER, ROLE_OWNER};
use agencia_core::types::DbId;
use agencia_db::models::user::{CreateUser, User};
use agencia_db::repositories::UserRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    /// `member` (default) or `admin`.
    #[validate(custom(function = "agencia_core::validation::assignable_role"))]
    pub role: Option<String>,
}

/// GET /api/users
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool, auth.agency_id).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/users
pub async fn create(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMemberRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        auth.agency_id,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash,
            role: input.role.unwrap_or_else(|| ROLE_MEMBER.to_string()),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, created_by = auth.user_id, "Member added");
    Ok((StatusCode::CREATED, Json(user)))
}

/// DELETE /api/users/{id}
///
/// Deactivates rather than deletes, so authored records keep their history.
pub async fn deactivate(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == auth.user_id {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".into(),
        ));
    }

    let target = UserRepo::find_by_id(&state.pool, auth.agency_id, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    if target.role == ROLE_OWNER {
        return Err(AppError::Core(CoreError::Forbidden(
            "The agency owner cannot be deactivated".into(),
        )));
    }

    if UserRepo::deactivate(&state.pool, auth.agency_id, id).await? {
        tracing::info!(user_id = id, by = auth.user_id, "Member deactivated");
    }
    Ok(StatusCode::NO_CONTENT)
}
