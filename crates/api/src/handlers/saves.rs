//! Handlers for the cloud save API.
//!
//! All routes operate on the authenticated user's own saves; slug and slot
//! are validated against the shared grammar here, at the boundary, and the
//! `state_json` ceiling is enforced before anything reaches the store.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use fireside_core::error::CoreError;
use fireside_core::slug::{validate_slot, validate_slug};
use fireside_db::models::game_save::UpsertSave;
use fireside_db::repositories::{GameSaveRepo, UpsertOutcome};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a successful delete.
#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: u64,
}

/// GET /playapi/saves/{slug}
///
/// List the authenticated user's saves for one game, slot-ascending,
/// without state bodies.
pub async fn list_saves(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&slug)?;

    let summaries = GameSaveRepo::list_summaries(&state.pool, user.user_id, &slug).await?;

    Ok(Json(DataResponse { data: summaries }))
}

/// GET /playapi/saves/{slug}/{slot}
///
/// Fetch one save slot, state body included.
pub async fn get_save(
    user: AuthUser,
    State(state): State<AppState>,
    Path((slug, slot)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&slug)?;
    validate_slot(&slot)?;

    let save = GameSaveRepo::get(&state.pool, user.user_id, &slug, &slot)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "save",
            key: format!("{slug}/{slot}"),
        })?;

    Ok(Json(DataResponse { data: save }))
}

/// POST /playapi/saves/{slug}
///
/// Create or update a save slot. Creation starts at rev 0. Updates carrying
/// `expected_rev` are accepted only against the matching stored revision;
/// a mismatch returns 409 with the current record embedded. Updates without
/// `expected_rev` are last-writer-wins.
pub async fn upsert_save(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpsertSave>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&slug)?;
    validate_slot(&input.slot)?;

    let limit = state.config.max_state_json_bytes;
    let state_bytes = input.state_json.to_string().len();
    if state_bytes > limit {
        return Err(AppError::PayloadTooLarge { limit });
    }

    match GameSaveRepo::upsert(&state.pool, user.user_id, &slug, &input).await? {
        UpsertOutcome::Saved(save) => {
            tracing::info!(
                user_id = user.user_id,
                game_slug = %slug,
                slot = %save.slot,
                rev = save.rev,
                "Save written",
            );
            Ok(Json(DataResponse { data: save }))
        }
        UpsertOutcome::Conflict(current) => Err(AppError::SaveConflict(Box::new(current))),
    }
}

/// DELETE /playapi/saves/{slug}/{slot}
///
/// Remove one save slot. Deleting a slot that does not exist is a 404, not
/// a server error; deleting twice yields one success and one 404.
pub async fn delete_save(
    user: AuthUser,
    State(state): State<AppState>,
    Path((slug, slot)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&slug)?;
    validate_slot(&slot)?;

    let deleted = GameSaveRepo::delete(&state.pool, user.user_id, &slug, &slot).await?;
    if deleted == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "save",
            key: format!("{slug}/{slot}"),
        }));
    }

    tracing::info!(
        user_id = user.user_id,
        game_slug = %slug,
        slot = %slot,
        "Save deleted",
    );

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}
