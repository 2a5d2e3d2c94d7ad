use std::sync::Arc;

use fireside_core::catalog::GameCatalog;
use fireside_core::engine::EngineResolutionChain;
use fireside_core::library::GameLibrary;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fireside_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Engine/shape resolution chain (Ink before Twine).
    pub engine_chain: Arc<EngineResolutionChain>,
    /// The game catalog with its shared TTL cache.
    pub catalog: Arc<GameCatalog>,
}

impl AppState {
    /// Wire up the game-root components from configuration.
    pub fn new(pool: fireside_db::DbPool, config: ServerConfig) -> Self {
        let library = Arc::new(GameLibrary::new(config.games_dir.clone()));
        let engine_chain = Arc::new(EngineResolutionChain::standard(Arc::clone(&library)));
        let catalog = Arc::new(GameCatalog::new(
            library,
            Arc::clone(&engine_chain),
            config.play_url_prefix.clone(),
            std::time::Duration::from_secs(config.catalog_cache_ttl_secs),
        ));

        Self {
            pool,
            config: Arc::new(config),
            engine_chain,
            catalog,
        }
    }
}
