use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /            -> list (board_id, project_id, status, assignee_id, search, page, limit)
/// POST   /            -> create (appended to its column)
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update (details only)
/// DELETE /{id}        -> delete
/// PATCH  /{id}/move   -> move_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route(
            "/{id}",
            get(tasks::get_by_id)
                .put(tasks::update)
                .delete(tasks::delete),
        )
        .route("/{id}/move", patch(tasks::move_task))
}
