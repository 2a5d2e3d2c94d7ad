//! Route definitions for the game catalog, mounted at `/games`.
//!
//! ```text
//! GET /        -> list_games
//! GET /{slug}  -> locate_game
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games))
        .route("/{slug}", get(games::locate_game))
}
