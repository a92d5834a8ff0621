//! Role-based access control extractors.

use agencia_core::error::CoreError;
use agencia_core::roles::is_manager;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `owner` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn update_settings(RequireManager(auth): RequireManager) -> AppResult<StatusCode> {
///     // auth.role is owner or admin here
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_manager(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner or admin role required".into(),
            )));
        }
        Ok(RequireManager(user))
    }
}
