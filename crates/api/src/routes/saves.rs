//! Route definitions for the cloud save API, mounted at `/saves`.
//!
//! ```text
//! GET    /{slug}        -> list_saves
//! POST   /{slug}        -> upsert_save
//! GET    /{slug}/{slot} -> get_save
//! DELETE /{slug}/{slot} -> delete_save
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::saves;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(saves::list_saves).post(saves::upsert_save))
        .route(
            "/{slug}/{slot}",
            get(saves::get_save).delete(saves::delete_save),
        )
}
