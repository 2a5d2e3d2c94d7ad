//! Repository for the `game_saves` table.
//!
//! The save store. Each save slot is addressed by `(user_id, game_slug, slot)`
//! and carries a monotonically increasing `rev`. The upsert is a single
//! `INSERT ... ON CONFLICT DO UPDATE` statement so the revision
//! check-and-increment is atomic with respect to concurrent writers on the
//! same tuple: the conflicting row is locked, the `WHERE` guard is
//! re-evaluated against the committed revision, and at most one writer can
//! consume a given revision value.

use sqlx::PgPool;

use fireside_core::types::DbId;

use crate::models::game_save::{GameSave, SaveSummary, UpsertSave};

/// Column list for `game_saves` queries.
const COLUMNS: &str = "\
    id, user_id, game_slug, slot, rev, state_json, meta_json, story_hash, \
    created_at, updated_at";

/// Column list for summary queries (no `state_json` body).
const SUMMARY_COLUMNS: &str = "\
    id, game_slug, slot, rev, meta_json, story_hash, created_at, updated_at";

/// Result of an upsert attempt.
#[derive(Debug)]
pub enum UpsertOutcome {
    /// The write was accepted; this is the stored record.
    Saved(GameSave),
    /// The caller's `expected_rev` no longer matches; this is the current
    /// server-side record, returned so the client can reconcile.
    Conflict(GameSave),
}

/// Provides data access for cloud saves.
pub struct GameSaveRepo;

impl GameSaveRepo {
    /// List a user's saves for one game, without state bodies.
    ///
    /// Ordered by slot ascending for a deterministic listing.
    pub async fn list_summaries(
        pool: &PgPool,
        user_id: DbId,
        game_slug: &str,
    ) -> Result<Vec<SaveSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM game_saves \
             WHERE user_id = $1 AND game_slug = $2 \
             ORDER BY slot ASC"
        );
        sqlx::query_as::<_, SaveSummary>(&query)
            .bind(user_id)
            .bind(game_slug)
            .fetch_all(pool)
            .await
    }

    /// Get one save slot, or `None` if the tuple has never been written.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        game_slug: &str,
        slot: &str,
    ) -> Result<Option<GameSave>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_saves \
             WHERE user_id = $1 AND game_slug = $2 AND slot = $3"
        );
        sqlx::query_as::<_, GameSave>(&query)
            .bind(user_id)
            .bind(game_slug)
            .bind(slot)
            .fetch_optional(pool)
            .await
    }

    /// Create or update a save slot.
    ///
    /// Creation inserts at `rev = 0` and ignores `expected_rev`. An update
    /// replaces `state_json`/`meta_json`/`story_hash`, bumps `rev` by exactly
    /// one and `updated_at` to now -- guarded by `rev = expected_rev` when the
    /// caller supplied one, unconditional (last-writer-wins) when it did not.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        game_slug: &str,
        dto: &UpsertSave,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let guard = match dto.expected_rev {
            Some(_) => "WHERE game_saves.rev = $7 ",
            None => "",
        };
        let query = format!(
            "INSERT INTO game_saves \
                 (user_id, game_slug, slot, state_json, meta_json, story_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, game_slug, slot) DO UPDATE SET \
                 rev = game_saves.rev + 1, \
                 state_json = EXCLUDED.state_json, \
                 meta_json = EXCLUDED.meta_json, \
                 story_hash = EXCLUDED.story_hash, \
                 updated_at = now() \
             {guard}\
             RETURNING {COLUMNS}"
        );

        let mut insert = sqlx::query_as::<_, GameSave>(&query)
            .bind(user_id)
            .bind(game_slug)
            .bind(&dto.slot)
            .bind(&dto.state_json)
            .bind(&dto.meta_json)
            .bind(&dto.story_hash);
        if let Some(expected_rev) = dto.expected_rev {
            insert = insert.bind(expected_rev);
        }

        match insert.fetch_optional(pool).await? {
            Some(save) => Ok(UpsertOutcome::Saved(save)),
            // The guarded update matched the unique tuple but not the
            // expected revision. Fetch the winning record for the caller.
            None => match Self::get(pool, user_id, game_slug, &dto.slot).await? {
                Some(current) => Ok(UpsertOutcome::Conflict(current)),
                None => Err(sqlx::Error::RowNotFound),
            },
        }
    }

    /// Delete one save slot. Returns the number of rows removed (0 or 1);
    /// deleting an absent tuple is not a store error.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        game_slug: &str,
        slot: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM game_saves \
             WHERE user_id = $1 AND game_slug = $2 AND slot = $3",
        )
        .bind(user_id)
        .bind(game_slug)
        .bind(slot)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
