use axum::routing::get;
use axum::Router;

use crate::handlers::expenses;
use crate::state::AppState;

/// Routes mounted at `/expenses`.
///
/// ```text
/// GET    /       -> list (from, to, category, client_id, project_id, page, limit)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expenses::list).post(expenses::create))
        .route(
            "/{id}",
            get(expenses::get_by_id)
                .put(expenses::update)
                .delete(expenses::delete),
        )
}
