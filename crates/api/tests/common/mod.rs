//! Shared test harness.
//!
//! Builds the application through the same [`build_app_router`] the binary
//! uses, pointed at a throwaway game root, and provides small helpers for
//! minting Bearer tokens and driving the router with `oneshot`.

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fireside_api::auth::jwt::{generate_access_token, JwtConfig};
use fireside_api::config::ServerConfig;
use fireside_api::router::build_app_router;
use fireside_api::state::AppState;

/// Build a test `JwtConfig` with a fixed secret.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry_mins: 60,
    }
}

/// Build a test `ServerConfig` over the given game root.
///
/// The catalog TTL is zero so fixtures written mid-test are visible on the
/// next request.
pub fn test_config(games_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        games_dir: games_dir.to_path_buf(),
        catalog_cache_ttl_secs: 0,
        catalog_scan_timeout_secs: 5,
        max_state_json_bytes: 1024 * 1024,
        play_url_prefix: "/play".to_string(),
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and game root.
pub fn build_test_app(pool: PgPool, games_dir: &Path) -> Router {
    let config = test_config(games_dir);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Mint a valid Bearer token for a test user.
pub fn bearer_token(user_id: i64) -> String {
    let token = generate_access_token(user_id, &format!("user{user_id}"), &test_jwt_config())
        .expect("token generation");
    format!("Bearer {token}")
}

/// Send one request through the router and return status plus parsed body.
///
/// Pass `token: None` for unauthenticated requests and `body: None` for
/// bodiless methods.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
