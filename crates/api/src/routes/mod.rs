pub mod agency;
pub mod auth;
pub mod boards;
pub mod clients;
pub mod dashboard;
pub mod expenses;
pub mod health;
pub mod ia;
pub mod instagram;
pub mod projects;
pub mod revenues;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   create agency + owner (public)
/// /auth/login                                      login (public)
/// /auth/logout                                     clear session cookie (public)
/// /auth/me                                         current user and agency
///
/// /agency                                          get, update (manager)
/// /users                                           list, create (manager)
/// /users/{id}                                      deactivate (manager)
///
/// /clients, /projects, /revenues, /expenses        list, create
/// /<resource>/{id}                                 get, update, delete
///
/// /boards                                          list, create
/// /boards/{id}                                     get with columns, update, delete
/// /tasks                                           list, create
/// /tasks/{id}                                      get, update, delete
/// /tasks/{id}/move                                 move within or across columns
///
/// /dashboard/stats                                 aggregate statistics
///
/// /ia/assistants                                   assistant catalogue
/// /ia/usage                                        AI usage this month
/// /ia/{assistant}                                  ask an assistant
///
/// /instagram/content                               slide texts
/// /instagram/background                            one background image
/// /instagram/carousel                              full carousel render
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/agency", agency::router())
        .nest("/users", users::router())
        .nest("/clients", clients::router())
        .nest("/projects", projects::router())
        .nest("/boards", boards::router())
        .nest("/tasks", tasks::router())
        .nest("/revenues", revenues::router())
        .nest("/expenses", expenses::router())
        .nest("/dashboard", dashboard::router())
        .nest("/ia", ia::router())
        .nest("/instagram", instagram::router())
}
