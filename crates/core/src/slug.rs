//! Slug and slot validation.
//!
//! Game slugs and save slots share one grammar: lowercase-insensitive
//! alphanumerics plus hyphen and underscore. The grammar is enforced at the
//! API boundary; everything below it (library probes, the save repository)
//! assumes already-validated input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum slug length, matching the `game_slug` column width.
pub const SLUG_MAX_LEN: usize = 100;

/// Maximum slot length, matching the `slot` column width.
pub const SLOT_MAX_LEN: usize = 50;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("slug regex is valid"));

/// Validate a game slug: non-empty, `^[a-z0-9_-]+$` (case-insensitive),
/// at most [`SLUG_MAX_LEN`] bytes.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    validate_ident(slug, "slug", SLUG_MAX_LEN)
}

/// Validate a save slot name. Same grammar as slugs, shorter cap.
pub fn validate_slot(slot: &str) -> Result<(), CoreError> {
    validate_ident(slot, "slot", SLOT_MAX_LEN)
}

/// Whether a bare name matches the slug grammar (no length check).
///
/// Used by the library scan to classify directory entries; the length caps
/// only matter for values that reach the save store.
pub fn matches_slug_grammar(value: &str) -> bool {
    !value.is_empty() && SLUG_RE.is_match(value)
}

fn validate_ident(value: &str, what: &str, max_len: usize) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{what} must not be empty")));
    }
    if value.len() > max_len {
        return Err(CoreError::Validation(format!(
            "{what} must be at most {max_len} characters"
        )));
    }
    if !SLUG_RE.is_match(value) {
        return Err(CoreError::Validation(format!(
            "{what} may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}
