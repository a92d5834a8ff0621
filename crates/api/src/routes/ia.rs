use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ia;
use crate::state::AppState;

/// Routes mounted at `/ia`.
///
/// ```text
/// GET    /assistants     -> catalogue
/// GET    /usage          -> usage
/// POST   /{assistant}    -> ask
/// ```
///
/// The static segments win over `{assistant}`, so no assistant may be
/// called `assistants` or `usage`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assistants", get(ia::catalogue))
        .route("/usage", get(ia::usage))
        .route("/{assistant}", post(ia::ask))
}
