use axum::routing::get;
use axum::Router;

use crate::handlers::boards;
use crate::state::AppState;

/// Routes mounted at `/boards`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id (board plus its four columns)
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete (cascades to its tasks)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(boards::list).post(boards::create))
        .route(
            "/{id}",
            get(boards::get_by_id)
                .put(boards::update)
                .delete(boards::delete),
        )
}
