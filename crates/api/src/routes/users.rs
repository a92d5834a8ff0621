use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (owner/admin)
/// DELETE /{id}   -> deactivate (owner/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/{id}", delete(users::deactivate))
}
