//! HTTP round-trip tests for the cloud save API.
//!
//! Each test drives the full router (middleware stack included) against a
//! real database and a throwaway game root.

mod common;

use axum::http::{Method, StatusCode};
use sqlx::PgPool;
use tempfile::TempDir;

use common::{bearer_token, build_test_app, send};

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_routes_require_a_token(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool, games.path());

    let (status, json) = send(&app, Method::GET, "/playapi/saves/cave", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, _) = send(
        &app,
        Method::GET,
        "/playapi/saves/cave",
        Some("Bearer not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_slug_and_slot_are_rejected(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool, games.path());
    let token = bearer_token(1);

    let (status, json) = send(
        &app,
        Method::GET,
        "/playapi/saves/bad.slug",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&token),
        Some(serde_json::json!({"slot": "bad slot", "state_json": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_fetch_roundtrip(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool, games.path());
    let token = bearer_token(1);

    let (status, json) = send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&token),
        Some(serde_json::json!({
            "slot": "slot1",
            "state_json": {"chapter": 2, "inventory": ["lamp"]},
            "story_hash": "abc123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["rev"], 0);
    assert_eq!(json["data"]["game_slug"], "cave");

    let (status, json) = send(
        &app,
        Method::GET,
        "/playapi/saves/cave/slot1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["state_json"]["chapter"], 2);
    assert_eq!(json["data"]["story_hash"], "abc123");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revision_conflict_returns_current_record(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool, games.path());
    let token = bearer_token(1);

    let upsert = |state: serde_json::Value, expected_rev: Option<i32>| {
        let mut body = serde_json::json!({"slot": "slot1", "state_json": state});
        if let Some(rev) = expected_rev {
            body["expected_rev"] = rev.into();
        }
        body
    };

    send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&token),
        Some(upsert(serde_json::json!({"v": 0}), None)),
    )
    .await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&token),
        Some(upsert(serde_json::json!({"v": 1}), Some(0))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["rev"], 1);

    // A second client still holding rev 0 must get the winner back.
    let (status, json) = send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&token),
        Some(upsert(serde_json::json!({"v": 2}), Some(0))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["current"]["rev"], 1);
    assert_eq!(json["current"]["state_json"]["v"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_is_slot_ordered_and_bodiless(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool, games.path());
    let token = bearer_token(1);

    for slot in ["b", "a"] {
        send(
            &app,
            Method::POST,
            "/playapi/saves/cave",
            Some(&token),
            Some(serde_json::json!({"slot": slot, "state_json": {"big": "blob"}})),
        )
        .await;
    }

    let (status, json) = send(&app, Method::GET, "/playapi/saves/cave", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["slot"], "a");
    assert_eq!(items[1]["slot"], "b");
    for item in items {
        assert!(item.get("state_json").is_none(), "summaries carry no state body");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_state_json_is_rejected(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool.clone(), games.path());
    let token = bearer_token(1);

    // One byte over the 1 MiB test ceiling once serialized.
    let blob = "x".repeat(1024 * 1024);
    let (status, json) = send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&token),
        Some(serde_json::json!({"slot": "slot1", "state_json": blob})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");

    // Nothing may have been written.
    let (status, _) = send(
        &app,
        Method::GET,
        "/playapi/saves/cave/slot1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_succeeds_once_then_404s(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool, games.path());
    let token = bearer_token(1);

    send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&token),
        Some(serde_json::json!({"slot": "slot1", "state_json": {}})),
    )
    .await;

    let (status, json) = send(
        &app,
        Method::DELETE,
        "/playapi/saves/cave/slot1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["deleted"], 1);

    let (status, json) = send(
        &app,
        Method::DELETE,
        "/playapi/saves/cave/slot1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn saves_are_invisible_across_users(pool: PgPool) {
    let games = TempDir::new().unwrap();
    let app = build_test_app(pool, games.path());
    let owner = bearer_token(1);
    let stranger = bearer_token(2);

    send(
        &app,
        Method::POST,
        "/playapi/saves/cave",
        Some(&owner),
        Some(serde_json::json!({"slot": "slot1", "state_json": {"secret": true}})),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::GET,
        "/playapi/saves/cave/slot1",
        Some(&stranger),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, Method::GET, "/playapi/saves/cave", Some(&stranger), None).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
