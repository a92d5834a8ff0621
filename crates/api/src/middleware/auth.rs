//! JWT-based authentication extractor for Axum handlers.

use agencia_core::error::CoreError;
use agencia_core::types::DbId;
use agencia_db::repositories::UserRepo;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::cookie::session_token;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the session token.
///
/// The token is read from `Authorization: Bearer <token>` first and from
/// the `agencia_session` cookie otherwise. Every tenant query in a handler
/// uses `agency_id` from here, never from the request body.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, agency_id = auth.agency_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub agency_id: DbId,
    /// The user's role name (`owner`, `admin` or `member`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            Some(header) => header
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization format. Expected: Bearer <token>".into(),
                    ))
                })?,
            None => session_token(&parts.headers).ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Authentication required".into()))
            })?,
        };

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // Deactivation takes effect immediately, not at token expiry.
        match UserRepo::is_active(&state.pool, claims.agency_id, claims.sub).await? {
            Some(true) => {}
            Some(false) => {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Account is deactivated".into(),
                )))
            }
            None => {
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Invalid or expired token".into(),
                )))
            }
        }

        Ok(AuthUser {
            user_id: claims.sub,
            agency_id: claims.agency_id,
            role: claims.role,
        })
    }
}
