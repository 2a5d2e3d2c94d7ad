pub mod games;
pub mod health;
pub mod saves;

use axum::Router;

use crate::state::AppState;

/// Build the `/playapi` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /saves/{slug}         GET list, POST upsert        (auth required)
/// /saves/{slug}/{slot}  GET fetch, DELETE remove     (auth required)
///
/// /games                GET catalog listing          (public)
/// /games/{slug}         GET engine/shape descriptor  (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/saves", saves::router())
        .nest("/games", games::router())
}
