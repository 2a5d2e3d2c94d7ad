//! Game catalog: scanning, metadata merge, dedup, ordering, and the shared
//! TTL cache.
//!
//! The catalog is derived state: one pass over the game root, one engine
//! resolution per candidate, one metadata sidecar per listed game. A game
//! without a parseable sidecar is not listed even if it is playable. A slug
//! installed in both directory and legacy form appears exactly once, with the
//! directory form taking precedence.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::engine::{EngineResolutionChain, GameDescriptor, GameEngine, GameShape};
use crate::library::GameLibrary;

/// Reserved root children that are never catalog candidates: the shared
/// assets directory, the liveness-check name, and the index page.
pub const RESERVED_NAMES: &[&str] = &["assets", "ping", "index"];

/// Default catalog cache freshness window.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// `length` display range.
const LENGTH_MIN: i64 = 1;
const LENGTH_MAX: i64 = 5;
const LENGTH_DEFAULT: i64 = 3;

const AUTHOR_DEFAULT: &str = "Unknown";
const COLOR_DEFAULT: &str = "text-amber-500";
const STRIP_COLOR_DEFAULT: &str = "bg-amber-600";

// ---------------------------------------------------------------------------
// Metadata sidecar
// ---------------------------------------------------------------------------

/// Parsed `meta.json` / `<slug>.json` sidecar. Every field is optional;
/// [`build_entry`] fills in the display defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameMeta {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub size: Option<String>,
    pub length: Option<i64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub color: Option<String>,
    #[serde(rename = "stripColor")]
    pub strip_color: Option<String>,
}

/// One catalog row, shaped for the catalog page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub size: String,
    pub length: i64,
    pub status: String,
    pub description: String,
    pub tags: Vec<String>,
    pub color: String,
    pub strip_color: String,
    pub engine: GameEngine,
    pub shape: GameShape,
    pub play_url: String,
}

/// Clamp a metadata `length` into the display range.
pub fn clamp_length(length: i64) -> i64 {
    length.clamp(LENGTH_MIN, LENGTH_MAX)
}

/// Merge a sidecar and a resolution verdict into a catalog entry.
///
/// The metadata id is used when positive; otherwise the next value from the
/// shared scan-order counter is assigned.
fn build_entry(
    slug: &str,
    meta: GameMeta,
    resolved: &GameDescriptor,
    auto_id: &mut i64,
    play_url_prefix: &str,
) -> CatalogEntry {
    let id = match meta.id {
        Some(id) if id > 0 => id,
        _ => {
            let id = *auto_id;
            *auto_id += 1;
            id
        }
    };

    CatalogEntry {
        id,
        slug: slug.to_string(),
        title: meta.title.unwrap_or_else(|| slug.to_string()),
        subtitle: meta.subtitle.unwrap_or_default(),
        author: meta.author.unwrap_or_else(|| AUTHOR_DEFAULT.to_string()),
        size: meta.size.unwrap_or_default(),
        length: clamp_length(meta.length.unwrap_or(LENGTH_DEFAULT)),
        status: meta.status.unwrap_or_default(),
        description: meta.description.unwrap_or_default(),
        tags: meta.tags.unwrap_or_default(),
        color: meta.color.unwrap_or_else(|| COLOR_DEFAULT.to_string()),
        strip_color: meta
            .strip_color
            .unwrap_or_else(|| STRIP_COLOR_DEFAULT.to_string()),
        engine: resolved.engine,
        shape: resolved.shape,
        play_url: format!("{}/{}", play_url_prefix.trim_end_matches('/'), slug),
    }
}

/// Load a candidate's sidecar as [`GameMeta`].
///
/// A sidecar must be a non-empty JSON object; anything else (missing file,
/// parse error, wrong top-level type, empty object, mistyped field) excludes
/// the candidate from the catalog.
fn load_meta(library: &GameLibrary, path: &std::path::Path) -> Option<GameMeta> {
    let value = library.read_sidecar(path)?;
    match value.as_object() {
        Some(obj) if !obj.is_empty() => serde_json::from_value(value).ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Build the full catalog in one pass over the game root.
///
/// Directory candidates are processed first and mark their slug as seen;
/// legacy single-file candidates only fill in slugs not already listed, which
/// gives the directory form precedence in the dedup.
pub fn scan(
    library: &GameLibrary,
    chain: &EngineResolutionChain,
    play_url_prefix: &str,
) -> Vec<CatalogEntry> {
    let entries = library.scan_entries();

    let mut items: Vec<CatalogEntry> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut auto_id: i64 = 1;

    for slug in &entries.dirs {
        let lower = slug.to_ascii_lowercase();
        if RESERVED_NAMES.contains(&lower.as_str()) {
            continue;
        }

        let resolved = chain.locate(slug);
        if !resolved.exists {
            continue;
        }

        let Some(meta) = load_meta(library, &library.dir_meta(slug)) else {
            continue;
        };

        items.push(build_entry(slug, meta, &resolved, &mut auto_id, play_url_prefix));
        seen.insert(lower);
    }

    for slug in &entries.legacy {
        let lower = slug.to_ascii_lowercase();
        if RESERVED_NAMES.contains(&lower.as_str()) || seen.contains(&lower) {
            continue;
        }

        let resolved = chain.locate(slug);
        if !resolved.exists {
            continue;
        }

        let Some(meta) = load_meta(library, &library.legacy_meta(slug)) else {
            continue;
        };

        items.push(build_entry(slug, meta, &resolved, &mut auto_id, play_url_prefix));
    }

    // Total order stable across repeated scans: id ascending, ties broken by
    // title (ordinal comparison).
    items.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.title.cmp(&b.title)));

    items
}

// ---------------------------------------------------------------------------
// Cached catalog
// ---------------------------------------------------------------------------

struct CachedCatalog {
    built_at: Instant,
    items: Arc<Vec<CatalogEntry>>,
}

/// The catalog with its process-wide TTL cache.
///
/// The cache is the only mutable state shared across requests. Rebuilds run
/// outside the lock and the finished list is installed in one swap, so a
/// reader arriving mid-rebuild sees either the previous complete list or the
/// new one, never a partial list. Two concurrent rebuilds may race; the loser
/// merely overwrites the cache with an equally complete list.
pub struct GameCatalog {
    library: Arc<GameLibrary>,
    chain: Arc<EngineResolutionChain>,
    play_url_prefix: String,
    ttl: Duration,
    cache: RwLock<Option<CachedCatalog>>,
}

impl GameCatalog {
    pub fn new(
        library: Arc<GameLibrary>,
        chain: Arc<EngineResolutionChain>,
        play_url_prefix: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            library,
            chain,
            play_url_prefix: play_url_prefix.into(),
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// The ordered catalog, served from cache while fresh.
    pub fn list(&self) -> Arc<Vec<CatalogEntry>> {
        if let Some(items) = self.fresh() {
            return items;
        }

        let items = Arc::new(scan(&self.library, &self.chain, &self.play_url_prefix));
        tracing::debug!(count = items.len(), "Rebuilt game catalog");

        let mut cache = self.cache.write().expect("catalog cache lock poisoned");
        *cache = Some(CachedCatalog {
            built_at: Instant::now(),
            items: Arc::clone(&items),
        });

        items
    }

    /// The cached list even when stale. Fallback for scans that hit their
    /// deadline.
    pub fn cached(&self) -> Option<Arc<Vec<CatalogEntry>>> {
        let cache = self.cache.read().expect("catalog cache lock poisoned");
        cache.as_ref().map(|c| Arc::clone(&c.items))
    }

    /// Drop the cached list; the next `list()` rescans.
    pub fn invalidate(&self) {
        let mut cache = self.cache.write().expect("catalog cache lock poisoned");
        *cache = None;
    }

    fn fresh(&self) -> Option<Arc<Vec<CatalogEntry>>> {
        let cache = self.cache.read().expect("catalog cache lock poisoned");
        cache
            .as_ref()
            .filter(|c| c.built_at.elapsed() < self.ttl)
            .map(|c| Arc::clone(&c.items))
    }
}
