//! Read-only repository over the game root.
//!
//! The game root is a user-populated directory tree: each installed game is
//! either a directory (`<slug>/index.html` plus assets) or a legacy single
//! file (`<slug>.html`). [`GameLibrary`] is the one place that knows this
//! layout; the engine detectors and the catalog scanner query it instead of
//! walking the tree themselves.
//!
//! Every probe here is tolerant: a missing root, a permission error, or an
//! unreadable file reads as "absent" rather than an error, so a broken game
//! can never take down resolution or the catalog scan.

use std::fs;
use std::path::{Path, PathBuf};

use crate::slug::matches_slug_grammar;

/// Directory-form entry point file name.
pub const DIR_ENTRY_POINT: &str = "index.html";

/// Metadata sidecar file name inside a directory-form game.
pub const DIR_META_FILE: &str = "meta.json";

/// Result of one pass over the game root's immediate children.
#[derive(Debug, Default)]
pub struct LibraryScan {
    /// Directory children whose name matches the slug grammar.
    pub dirs: Vec<String>,
    /// Slugs extracted from legacy `<slug>.html` file children.
    pub legacy: Vec<String>,
}

/// Read-only view of the game root directory.
#[derive(Debug, Clone)]
pub struct GameLibrary {
    root: PathBuf,
}

impl GameLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<slug>/index.html` -- directory-form entry point.
    pub fn dir_entry_point(&self, slug: &str) -> PathBuf {
        self.root.join(slug).join(DIR_ENTRY_POINT)
    }

    /// `<root>/<slug>.html` -- legacy single-file form.
    pub fn legacy_file(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.html"))
    }

    /// `<root>/<slug>/meta.json` -- directory-form metadata sidecar.
    pub fn dir_meta(&self, slug: &str) -> PathBuf {
        self.root.join(slug).join(DIR_META_FILE)
    }

    /// `<root>/<slug>.json` -- legacy-form metadata sidecar.
    pub fn legacy_meta(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.json"))
    }

    /// Whether `path` exists and is a regular file.
    ///
    /// Filesystem errors (including permission errors) read as `false`.
    pub fn has_file(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    /// Enumerate the root's immediate children exactly once and classify them
    /// into directory-slug candidates and legacy single-file candidates.
    ///
    /// Candidates are returned name-sorted so repeated scans of an unchanged
    /// root observe the same order (auto-id assignment depends on it). An
    /// unreadable root yields an empty scan. Children that are neither a
    /// grammar-conforming directory nor a `<slug>.html` file are ignored.
    pub fn scan_entries(&self) -> LibraryScan {
        let mut scan = LibraryScan::default();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(root = %self.root.display(), error = %err, "Game root not readable");
                return scan;
            }
        };

        for entry in entries.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir {
                if matches_slug_grammar(&name) {
                    scan.dirs.push(name);
                }
            } else if let Some(stem) = name.strip_suffix(".html") {
                if matches_slug_grammar(stem) {
                    scan.legacy.push(stem.to_string());
                }
            }
        }

        scan.dirs.sort();
        scan.legacy.sort();
        scan
    }

    /// Read and parse a JSON metadata sidecar.
    ///
    /// Returns `None` when the file is missing, unreadable, or not valid
    /// JSON -- a malformed sidecar skips one game, never the whole scan.
    pub fn read_sidecar(&self, path: &Path) -> Option<serde_json::Value> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Skipping malformed metadata sidecar");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn library(root: &TempDir) -> GameLibrary {
        GameLibrary::new(root.path())
    }

    #[test]
    fn scan_classifies_dirs_and_legacy_files() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("cave")).unwrap();
        fs::create_dir(root.path().join("bad name")).unwrap();
        fs::write(root.path().join("relic.html"), "<html></html>").unwrap();
        fs::write(root.path().join("notes.txt"), "x").unwrap();

        let mut scan = library(&root).scan_entries();
        scan.dirs.sort();
        scan.legacy.sort();

        assert_eq!(scan.dirs, vec!["cave"]);
        assert_eq!(scan.legacy, vec!["relic"]);
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let root = TempDir::new().unwrap();
        let lib = GameLibrary::new(root.path().join("does-not-exist"));

        let scan = lib.scan_entries();
        assert!(scan.dirs.is_empty());
        assert!(scan.legacy.is_empty());
    }

    #[test]
    fn has_file_distinguishes_files_from_dirs() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("cave")).unwrap();
        fs::write(root.path().join("cave").join("index.html"), "x").unwrap();

        let lib = library(&root);
        assert!(lib.has_file(&lib.dir_entry_point("cave")));
        assert!(!lib.has_file(&root.path().join("cave")));
        assert!(!lib.has_file(&lib.legacy_file("cave")));
    }

    #[test]
    fn sidecar_read_tolerates_missing_and_malformed_files() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("ok.json"), r#"{"title":"Cave"}"#).unwrap();
        fs::write(root.path().join("broken.json"), "{not json").unwrap();

        let lib = library(&root);
        assert!(lib.read_sidecar(&root.path().join("ok.json")).is_some());
        assert!(lib.read_sidecar(&root.path().join("broken.json")).is_none());
        assert!(lib.read_sidecar(&root.path().join("missing.json")).is_none());
    }
}
