//! Cloud save models and DTOs.
//!
//! A save is addressed by the `(user_id, game_slug, slot)` tuple; `rev` is
//! the per-tuple optimistic-concurrency counter. `state_json` and `meta_json`
//! are opaque to the store.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fireside_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `game_saves` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameSave {
    pub id: DbId,
    pub user_id: DbId,
    pub game_slug: String,
    pub slot: String,
    pub rev: i32,
    pub state_json: serde_json::Value,
    pub meta_json: Option<serde_json::Value>,
    pub story_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A `game_saves` row without the `state_json` body, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SaveSummary {
    pub id: DbId,
    pub game_slug: String,
    pub slot: String,
    pub rev: i32,
    pub meta_json: Option<serde_json::Value>,
    pub story_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating or updating a save slot.
///
/// `expected_rev` enables optimistic concurrency: when supplied it must match
/// the stored revision or the write is rejected. Omitting it selects
/// last-writer-wins. It is ignored when the write creates the slot.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSave {
    pub slot: String,
    pub state_json: serde_json::Value,
    pub meta_json: Option<serde_json::Value>,
    pub story_hash: Option<String>,
    pub expected_rev: Option<i32>,
}
