//! Handlers for the game catalog and entry-point resolution.
//!
//! The catalog listing is public (the catalog page renders before login);
//! saves are the authenticated surface. Scans run on the blocking pool under
//! a deadline and fail closed to the cached listing rather than erroring.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use fireside_core::catalog::CatalogEntry;
use fireside_core::error::CoreError;
use fireside_core::slug::validate_slug;

use crate::error::AppResult;
use crate::response::{DataResponse, ItemsResponse};
use crate::state::AppState;

/// GET /playapi/games
///
/// The ordered catalog listing, served from the shared TTL cache when fresh.
/// A scan that exceeds the configured deadline (or dies) degrades to the
/// previous cached listing, or an empty one -- never a hang, never a 500.
pub async fn list_games(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let catalog = Arc::clone(&state.catalog);
    let deadline = Duration::from_secs(state.config.catalog_scan_timeout_secs);

    let scan = tokio::time::timeout(deadline, tokio::task::spawn_blocking(move || catalog.list()));

    let items: Vec<CatalogEntry> = match scan.await {
        Ok(Ok(items)) => items.as_ref().clone(),
        Ok(Err(join_err)) => {
            tracing::error!(error = %join_err, "Catalog scan task failed");
            stale_items(&state)
        }
        Err(_) => {
            // The scan keeps running and will refresh the cache on its own;
            // this request gets whatever was last built.
            tracing::warn!(
                deadline_secs = state.config.catalog_scan_timeout_secs,
                "Catalog scan deadline exceeded, serving cached listing",
            );
            stale_items(&state)
        }
    };

    Ok(Json(ItemsResponse { items }))
}

/// GET /playapi/games/{slug}
///
/// Resolve one slug to its engine/shape descriptor. This is the surface the
/// page-serving collaborator uses to find which physical file to serve and
/// to report packaging for diagnostics.
pub async fn locate_game(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&slug)?;

    let descriptor = state.engine_chain.locate(&slug);
    if !descriptor.exists {
        return Err(CoreError::NotFound {
            entity: "game",
            key: slug,
        }
        .into());
    }

    Ok(Json(DataResponse { data: descriptor }))
}

fn stale_items(state: &AppState) -> Vec<CatalogEntry> {
    state
        .catalog
        .cached()
        .map(|items| items.as_ref().clone())
        .unwrap_or_default()
}
