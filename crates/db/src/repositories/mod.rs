//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod game_save_repo;

pub use game_save_repo::{GameSaveRepo, UpsertOutcome};
