mod common;

use axum::ServiceExt;
use axum::extract::Request;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use user_cache_service::infrastructure::cache::CacheService;
use user_cache_service::routes::app_router;

#[tokio::test]
async fn test_create_user_success() {
    let ctx = common::setup();

    let response = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["name"], "Akash");
    assert_eq!(json["email"], "akash@gmail.com");
}

#[tokio::test]
async fn test_create_user_empty_name() {
    let ctx = common::setup();

    let response = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "", "email": "akash@gmail.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "Error": "name is invalid and empty" }));
    assert_eq!(ctx.users.len(), 0);
}

#[tokio::test]
async fn test_create_user_missing_email_prefix() {
    let ctx = common::setup();

    let response = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "@gmail.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "Error": "email must contain a prefix before the @gmail.com"
    }));
}

#[tokio::test]
async fn test_create_user_wrong_domain() {
    let ctx = common::setup();

    let response = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@yahoo.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "Error": "email is invalid and does not contain @gmail.com"
    }));
}

#[tokio::test]
async fn test_create_user_ignores_client_id() {
    let ctx = common::setup();

    let response = ctx
        .server
        .post("/users")
        .json(&json!({ "id": 999, "name": "Akash", "email": "akash@gmail.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["id"], 1);
}

#[tokio::test]
async fn test_create_user_store_failure() {
    let ctx = common::setup();
    ctx.users.set_failing(true);

    let response = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("connection refused"));
}

#[tokio::test]
async fn test_create_then_get_is_byte_identical() {
    let ctx = common::setup();

    let created = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    let fetched = ctx.server.get(&format!("/users/{}", id)).await;

    fetched.assert_status_ok();
    assert_eq!(fetched.header("content-type"), "application/json");
    assert_eq!(fetched.text(), created.text());
}

#[tokio::test]
async fn test_get_served_from_cache_without_store() {
    let ctx = common::setup();

    let created = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    ctx.users.set_failing(true);

    let fetched = ctx.server.get(&format!("/users/{}", id)).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.text(), created.text());
}

#[tokio::test]
async fn test_get_user_not_found() {
    let ctx = common::setup();

    let response = ctx.server.get("/users/4567").await;

    response.assert_status_not_found();
    response.assert_text("user not found");
}

#[tokio::test]
async fn test_get_user_non_numeric_id() {
    let ctx = common::setup();

    let response = ctx.server.get("/users/abc").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_get_after_eviction_rebuilds_cache() {
    let ctx = common::setup();

    let created = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;
    let id = created.json::<Value>()["id"].as_i64().unwrap();
    let key = id.to_string();

    ctx.cache.delete(&key).await.unwrap();
    assert!(ctx.cache.get(&key).await.unwrap().is_none());

    let fetched = ctx.server.get(&format!("/users/{}", id)).await;

    fetched.assert_status_ok();
    assert_eq!(fetched.text(), created.text());
    assert_eq!(ctx.cache.get(&key).await.unwrap(), Some(created.text()));
}

#[tokio::test]
async fn test_update_user_visible_in_store_and_cache() {
    let ctx = common::setup();

    let created = ctx
        .server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    let updated = ctx
        .server
        .put(&format!("/users/{}", id))
        .json(&json!({ "name": "Ravi", "email": "ravi@gmail.com" }))
        .await;

    updated.assert_status_ok();
    updated.assert_json(&json!({ "id": id, "name": "Ravi", "email": "ravi@gmail.com" }));

    let stored = ctx.users.get(&id).unwrap();
    assert_eq!(stored.name, "Ravi");
    assert_eq!(stored.email, "ravi@gmail.com");

    ctx.users.set_failing(true);
    let fetched = ctx.server.get(&format!("/users/{}", id)).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.text(), updated.text());
}

#[tokio::test]
async fn test_update_user_path_id_wins_over_body_id() {
    let ctx = common::setup();

    ctx.server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;

    let response = ctx
        .server
        .put("/users/1")
        .json(&json!({ "id": 42, "name": "Ravi", "email": "ravi@gmail.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], 1);
}

#[tokio::test]
async fn test_update_user_validates_input() {
    let ctx = common::setup();

    ctx.server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;

    let response = ctx
        .server
        .put("/users/1")
        .json(&json!({ "name": "   ", "email": "akash@gmail.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "Error": "name is invalid and empty" }));
    assert_eq!(ctx.users.get(&1).unwrap().name, "Akash");
}

#[tokio::test]
async fn test_update_user_not_found() {
    let ctx = common::setup();

    let response = ctx
        .server
        .put("/users/4567")
        .json(&json!({ "name": "Ravi", "email": "ravi@gmail.com" }))
        .await;

    response.assert_status_not_found();
    response.assert_text("user not found");
}

#[tokio::test]
async fn test_delete_user_success() {
    let ctx = common::setup();

    ctx.server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;

    let response = ctx.server.delete("/users/1").await;

    response.assert_status_ok();
    response.assert_text("user deleted");
    assert!(ctx.cache.get("1").await.unwrap().is_none());

    ctx.server.get("/users/1").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_user_twice_is_not_found() {
    let ctx = common::setup();

    ctx.server
        .post("/users")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;

    ctx.server.delete("/users/1").await.assert_status_ok();

    let response = ctx.server.delete("/users/1").await;
    response.assert_status_not_found();
    response.assert_text("user not found");
}

#[tokio::test]
async fn test_delete_user_store_failure() {
    let ctx = common::setup();
    ctx.users.set_failing(true);

    let response = ctx.server.delete("/users/1").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_app_router_trims_trailing_slash() {
    let (state, _cache, _users, _persons) = common::create_test_state();
    let server =
        TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap();

    let created = server
        .post("/users/")
        .json(&json!({ "name": "Akash", "email": "akash@gmail.com" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let fetched = server.get("/users/1/").await;
    fetched.assert_status_ok();
    assert_eq!(fetched.text(), created.text());

    server.get("/health/").await.assert_status_ok();
}
