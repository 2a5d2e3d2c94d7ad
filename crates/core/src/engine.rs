//! Engine and shape resolution for installed games.
//!
//! A game's authoring engine is inferred from its on-disk packaging alone:
//! detectors probe for entry-point presence through the [`GameLibrary`] and
//! never read file contents, so resolution stays cheap enough to run once per
//! catalog candidate. Detectors are consulted in a fixed priority order and
//! the first claim wins; the order is a deliberate tie-break (Ink before
//! Twine) and is not commutative.

use std::sync::Arc;

use serde::Serialize;

use crate::library::GameLibrary;

/// Authoring engine family, inferred from packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameEngine {
    Ink,
    Twine,
    Unknown,
}

impl GameEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ink => "ink",
            Self::Twine => "twine",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk packaging form of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameShape {
    /// A directory with an `index.html` entry point.
    #[serde(rename = "directory")]
    Directory,
    /// A single `<slug>.html` file beside the root.
    #[serde(rename = "legacy-file")]
    LegacyFile,
    /// No matching packaging found.
    #[serde(rename = "absent")]
    Absent,
}

impl GameShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::LegacyFile => "legacy-file",
            Self::Absent => "absent",
        }
    }
}

impl std::fmt::Display for GameShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution verdict for one slug. Produced fresh on every call, never
/// cached by the chain itself.
#[derive(Debug, Clone, Serialize)]
pub struct GameDescriptor {
    pub slug: String,
    pub engine: GameEngine,
    pub shape: GameShape,
    pub exists: bool,
}

impl GameDescriptor {
    /// The "nothing matched" descriptor.
    pub fn absent(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            engine: GameEngine::Unknown,
            shape: GameShape::Absent,
            exists: false,
        }
    }
}

/// One packaging/engine pattern. Implementations decide from filesystem
/// presence alone whether they claim a slug.
pub trait FormatDetector: Send + Sync {
    /// The engine identifier this detector reports.
    fn engine(&self) -> GameEngine;

    /// Whether this detector claims the slug.
    fn matches(&self, slug: &str) -> bool;

    /// The full verdict for a claimed slug.
    fn describe(&self, slug: &str) -> GameDescriptor;
}

/// Detects Ink games: directory packaging with an `index.html` entry point.
pub struct InkDetector {
    library: Arc<GameLibrary>,
}

impl InkDetector {
    pub fn new(library: Arc<GameLibrary>) -> Self {
        Self { library }
    }
}

impl FormatDetector for InkDetector {
    fn engine(&self) -> GameEngine {
        GameEngine::Ink
    }

    fn matches(&self, slug: &str) -> bool {
        self.library.has_file(&self.library.dir_entry_point(slug))
    }

    fn describe(&self, slug: &str) -> GameDescriptor {
        GameDescriptor {
            slug: slug.to_string(),
            engine: GameEngine::Ink,
            shape: GameShape::Directory,
            exists: true,
        }
    }
}

/// Detects Twine games: a legacy single `<slug>.html` file.
pub struct TwineDetector {
    library: Arc<GameLibrary>,
}

impl TwineDetector {
    pub fn new(library: Arc<GameLibrary>) -> Self {
        Self { library }
    }
}

impl FormatDetector for TwineDetector {
    fn engine(&self) -> GameEngine {
        GameEngine::Twine
    }

    fn matches(&self, slug: &str) -> bool {
        self.library.has_file(&self.library.legacy_file(slug))
    }

    fn describe(&self, slug: &str) -> GameDescriptor {
        GameDescriptor {
            slug: slug.to_string(),
            engine: GameEngine::Twine,
            shape: GameShape::LegacyFile,
            exists: true,
        }
    }
}

/// Ordered list of detectors; the first match wins.
pub struct EngineResolutionChain {
    detectors: Vec<Box<dyn FormatDetector>>,
}

impl EngineResolutionChain {
    pub fn new(detectors: Vec<Box<dyn FormatDetector>>) -> Self {
        Self { detectors }
    }

    /// The standard chain: Ink first, then Twine.
    pub fn standard(library: Arc<GameLibrary>) -> Self {
        Self::new(vec![
            Box::new(InkDetector::new(Arc::clone(&library))),
            Box::new(TwineDetector::new(library)),
        ])
    }

    /// Resolve a slug to the first matching detector's verdict.
    ///
    /// The slug is assumed to already satisfy the slug grammar. Read-only;
    /// detectors that cannot access the filesystem simply do not match, so
    /// resolution degrades to "not found" instead of failing.
    pub fn locate(&self, slug: &str) -> GameDescriptor {
        for detector in &self.detectors {
            if detector.matches(slug) {
                return detector.describe(slug);
            }
        }
        GameDescriptor::absent(slug)
    }
}
