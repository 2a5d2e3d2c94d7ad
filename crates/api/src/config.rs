use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root directory holding installed games (default: `storage/games`).
    pub games_dir: PathBuf,
    /// Catalog cache freshness window in seconds (default: `300`).
    pub catalog_cache_ttl_secs: u64,
    /// Deadline for one catalog scan in seconds (default: `5`). A scan that
    /// exceeds it falls back to the cached (possibly stale) listing.
    pub catalog_scan_timeout_secs: u64,
    /// Upper bound on a serialized `state_json` payload in bytes
    /// (default: 1 MiB).
    pub max_state_json_bytes: usize,
    /// URL prefix the catalog uses to build per-game play links
    /// (default: `/play`).
    pub play_url_prefix: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default         |
    /// |-----------------------------|-----------------|
    /// | `HOST`                      | `0.0.0.0`       |
    /// | `PORT`                      | `3000`          |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`            |
    /// | `GAMES_DIR`                 | `storage/games` |
    /// | `CATALOG_CACHE_TTL_SECS`    | `300`           |
    /// | `CATALOG_SCAN_TIMEOUT_SECS` | `5`             |
    /// | `MAX_STATE_JSON_BYTES`      | `1048576`       |
    /// | `PLAY_URL_PREFIX`           | `/play`         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let games_dir: PathBuf = std::env::var("GAMES_DIR")
            .unwrap_or_else(|_| "storage/games".into())
            .into();

        let catalog_cache_ttl_secs: u64 = std::env::var("CATALOG_CACHE_TTL_SECS")
            .unwrap_or_else(|_| fireside_core::catalog::DEFAULT_CACHE_TTL_SECS.to_string())
            .parse()
            .expect("CATALOG_CACHE_TTL_SECS must be a valid u64");

        let catalog_scan_timeout_secs: u64 = std::env::var("CATALOG_SCAN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("CATALOG_SCAN_TIMEOUT_SECS must be a valid u64");

        let max_state_json_bytes: usize = std::env::var("MAX_STATE_JSON_BYTES")
            .unwrap_or_else(|_| (1024 * 1024).to_string())
            .parse()
            .expect("MAX_STATE_JSON_BYTES must be a valid usize");

        let play_url_prefix =
            std::env::var("PLAY_URL_PREFIX").unwrap_or_else(|_| "/play".into());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            games_dir,
            catalog_cache_ttl_secs,
            catalog_scan_timeout_secs,
            max_state_json_bytes,
            play_url_prefix,
            jwt,
        }
    }
}
