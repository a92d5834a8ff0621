use axum::routing::get;
use axum::Router;

use crate::handlers::revenues;
use crate::state::AppState;

/// Routes mounted at `/revenues`.
///
/// ```text
/// GET    /       -> list (from, to, category, status, client_id, project_id, page, limit)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(revenues::list).post(revenues::create))
        .route(
            "/{id}",
            get(revenues::get_by_id)
                .put(revenues::update)
                .delete(revenues::delete),
        )
}
