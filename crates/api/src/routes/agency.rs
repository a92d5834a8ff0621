use axum::routing::get;
use axum::Router;

use crate::handlers::agency;
use crate::state::AppState;

/// Routes mounted at `/agency`.
///
/// ```text
/// GET    /   -> get
/// PUT    /   -> update (owner/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(agency::get).put(agency::update))
}
