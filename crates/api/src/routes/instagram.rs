use axum::routing::post;
use axum::Router;

use crate::handlers::instagram;
use crate::state::AppState;

/// Routes mounted at `/instagram`.
///
/// ```text
/// POST   /content      -> content (falls back to a static deck)
/// POST   /background   -> background (503 on failure)
/// POST   /carousel     -> carousel (503 only if no slide rendered)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", post(instagram::content))
        .route("/background", post(instagram::background))
        .route("/carousel", post(instagram::carousel))
}
