//! HTTP-level tests: the real router over an in-memory SQLite database
//! migrated with the production migrator.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{ header, Request, StatusCode };
use axum::Router;
use migration::{ Migrator, MigratorTrait };
use sea_orm::{ ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait };
use serde_json::{ json, Value };
use tower::ServiceExt;
use uuid::Uuid;

use super::{ router, AppState };
use crate::auth::TokenService;
use crate::db::entity::User;

const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

async fn setup_test_db() -> DatabaseConnection {
    // A single pooled connection, otherwise every connection opens its own
    // empty in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.expect("Failed to create test database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

fn test_app(db: DatabaseConnection, gate_resources: bool) -> Router {
    let tokens = Arc::new(TokenService::new(SECRET, 1, 10));
    router(AppState::from_connection(db, tokens), gate_resources)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) =>
            request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn register_and_login(app: &Router, email: &str, password: &str) -> Value {
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/register",
        Some(json!({ "name": "Alice", "email": email, "password": password })),
        None
    ).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": email, "password": password })),
        None
    ).await;
    assert_eq!(status, StatusCode::OK);
    body
}

// ─── Resources ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_wallet_lifecycle() {
    let app = test_app(setup_test_db().await, false);

    let (status, created) = send(
        &app,
        "POST",
        "/api/wallets",
        Some(json!({ "address": "0xabc", "label": "Main", "chain": "Ethereum", "userId": "u1" })),
        None
    ).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["address"], "0xabc");
    assert_eq!(created["label"], "Main");
    assert_eq!(created["chain"], "Ethereum");
    assert_eq!(created["userId"], "u1");
    assert!(created["createdAt"].is_string());
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", "/api/wallets?userId=u1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["_id"], id.as_str());

    let (status, body) = send(&app, "DELETE", &format!("/api/wallets/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Wallet deleted" }));

    let (status, listed) = send(&app, "GET", "/api/wallets?userId=u1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_string_fields_are_stored_as_sent() {
    let app = test_app(setup_test_db().await, false);

    let (status, created) = send(
        &app,
        "POST",
        "/api/wallets",
        Some(json!({ "address": "0xabc", "label": " Main ", "chain": "Ethereum ", "userId": " u1" })),
        None
    ).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["label"], " Main ");
    assert_eq!(created["chain"], "Ethereum ");
    assert_eq!(created["userId"], " u1");

    let (status, listed) = send(&app, "GET", "/api/wallets?userId=%20u1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["label"], " Main ");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/wallets/{}", created["_id"].as_str().unwrap()),
        Some(json!({ "label": "  Cold storage" })),
        None
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["label"], "  Cold storage");
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let app = test_app(setup_test_db().await, false);

    for (hash, owner) in [("0x01", "u1"), ("0x02", "u1"), ("0x03", "u2")] {
        let (status, created) = send(
            &app,
            "POST",
            "/api/transactions",
            Some(
                json!({
                "hash": hash,
                "from": "0xfrom",
                "to": "0xto",
                "value": 1.25,
                "chain": "Polygon",
                "userId": owner
            })
            ),
            None
        ).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["hash"], hash);
        assert_eq!(created["from"], "0xfrom");
        assert_eq!(created["to"], "0xto");
        assert_eq!(created["value"], 1.25);
    }

    let (_, listed) = send(&app, "GET", "/api/transactions?userId=u1", None, None).await;
    let hashes: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|tx| tx["hash"].as_str().unwrap())
        .collect();
    assert_eq!(hashes.len(), 2);
    assert!(hashes.contains(&"0x01"));
    assert!(hashes.contains(&"0x02"));

    let (_, listed) = send(&app, "GET", "/api/transactions?userId=nobody", None, None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_list_requires_user_id() {
    let app = test_app(setup_test_db().await, false);

    let (status, body) = send(&app, "GET", "/api/alerts", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_repeated_user_id_is_bad_request() {
    let app = test_app(setup_test_db().await, false);

    for uri in [
        "/api/wallets?userId=a&userId=b",
        "/api/transactions?userId=a&userId=b",
        "/api/alerts?userId=a&userId=b",
    ] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "INVALID_INPUT", "{}", uri);
    }
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = test_app(setup_test_db().await, false);

    // missing label
    let (status, body) = send(
        &app,
        "POST",
        "/api/wallets",
        Some(json!({ "address": "0xabc", "chain": "Ethereum", "userId": "u1" })),
        None
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "label is required");

    // value must be numeric
    let (status, _) = send(
        &app,
        "POST",
        "/api/transactions",
        Some(
            json!({
            "hash": "0x01", "from": "a", "to": "b", "value": "lots", "chain": "Ethereum", "userId": "u1"
        })
        ),
        None
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // unsupported alert condition
    let (status, body) = send(
        &app,
        "POST",
        "/api/alerts",
        Some(json!({ "symbol": "ETH", "targetPrice": 3000, "condition": "sideways", "userId": "u1" })),
        None
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (_, listed) = send(&app, "GET", "/api/alerts?userId=u1", None, None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app(setup_test_db().await, false);

    let request = Request::builder()
        .method("POST")
        .uri("/api/wallets")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_alert_partial_update() {
    let app = test_app(setup_test_db().await, false);

    let (status, created) = send(
        &app,
        "POST",
        "/api/alerts",
        Some(json!({ "symbol": "BTC", "targetPrice": 70000.0, "condition": "Above", "userId": "u1" })),
        None
    ).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["condition"], "above");
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/alerts/{}", id),
        Some(json!({ "condition": "below", "targetPrice": 65000.5 })),
        None
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["_id"], id.as_str());
    assert_eq!(updated["condition"], "below");
    assert_eq!(updated["targetPrice"], 65000.5);
    assert_eq!(updated["symbol"], "BTC");
    assert_eq!(updated["userId"], "u1");

    // an empty payload leaves the record as it was
    let (status, unchanged) = send(
        &app,
        "PUT",
        &format!("/api/alerts/{}", id),
        Some(json!({})),
        None
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, updated);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/alerts/{}", id),
        Some(json!({ "condition": "sideways" })),
        None
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(&app, "GET", "/api/alerts?userId=u1", None, None).await;
    assert_eq!(listed[0]["condition"], "below");
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let app = test_app(setup_test_db().await, false);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/wallets/{}", Uuid::new_v4()),
        Some(json!({ "label": "Renamed" })),
        None
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Wallet not found");

    // ids that are not UUIDs cannot exist either
    let (status, body) = send(
        &app,
        "PUT",
        "/api/transactions/507f1f77bcf86cd799439011",
        Some(json!({ "value": 2 })),
        None
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Transaction not found");
}

#[tokio::test]
async fn test_update_missing_record_with_invalid_payload_is_not_found() {
    let app = test_app(setup_test_db().await, false);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/wallets/{}", Uuid::new_v4()),
        Some(json!({ "label": "" })),
        None
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Wallet not found");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/transactions/{}", Uuid::new_v4()),
        Some(json!({ "hash": "   " })),
        None
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Transaction not found");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/alerts/{}", Uuid::new_v4()),
        Some(json!({ "condition": "sideways" })),
        None
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Alert not found");
}

#[tokio::test]
async fn test_delete_missing_record_is_not_found() {
    let app = test_app(setup_test_db().await, false);

    let (status, created) = send(
        &app,
        "POST",
        "/api/transactions",
        Some(
            json!({
            "hash": "0xdead", "from": "a", "to": "b", "value": 0, "chain": "Base", "userId": "u1"
        })
        ),
        None
    ).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/transactions/{}", created["_id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Transaction deleted");

    let (status, body) = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Transaction not found");

    let (status, _) = send(&app, "DELETE", "/api/alerts/not-an-id", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let db = setup_test_db().await;
    let app = test_app(db.clone(), false);

    let payload = json!({ "name": "Alice", "email": "alice@example.com", "password": "correct horse" });

    let (status, body) = send(&app, "POST", "/api/auth/register", Some(payload), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "name": "Impostor", "email": "Alice@Example.com", "password": "other" })),
        None
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "user already exists" }));

    assert_eq!(User::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_requires_fields() {
    let app = test_app(setup_test_db().await, false);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "name": "Alice", "email": "not-an-email", "password": "secret" })),
        None
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "name": "Alice", "email": "alice@example.com" })),
        None
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_issues_verifiable_tokens() {
    let app = test_app(setup_test_db().await, false);

    let body = register_and_login(&app, "alice@example.com", "correct horse").await;
    assert_eq!(body["message"], "Login successful!");

    let tokens = TokenService::new(SECRET, 1, 10);
    let access = tokens.verify(body["token"].as_str().unwrap()).unwrap();
    let refresh = tokens.verify(body["token1"].as_str().unwrap()).unwrap();

    assert_eq!(access.email, "alice@example.com");
    assert_eq!(access.sub, refresh.sub);
    assert!(Uuid::parse_str(&access.sub).is_ok());
    assert_eq!(access.exp - access.iat, 3600);
    assert_eq!(refresh.exp - refresh.iat, 10 * 3600);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app(setup_test_db().await, false);
    register_and_login(&app, "alice@example.com", "correct horse").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "alice@example.com", "password": "battery staple" })),
        None
    ).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid email or password" }));
    assert!(body.get("token").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "bob@example.com", "password": "correct horse" })),
        None
    ).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid email or password" }));
}

#[tokio::test]
async fn test_profile_requires_bearer_token() {
    let app = test_app(setup_test_db().await, false);

    let (status, body) = send(&app, "GET", "/api/auth/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "token not provided");

    let request = Request::builder()
        .uri("/api/auth/profile")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Malformed token");

    let (status, body) = send(&app, "GET", "/api/auth/profile", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");

    let login = register_and_login(&app, "alice@example.com", "correct horse").await;
    let (status, body) = send(
        &app,
        "GET",
        "/api/auth/profile",
        None,
        login["token"].as_str()
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to your profile!");
    assert_eq!(body["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_gated_resources() {
    let app = test_app(setup_test_db().await, true);
    let payload = json!({ "address": "0xabc", "label": "Main", "chain": "Ethereum", "userId": "u1" });

    let (status, body) = send(&app, "POST", "/api/wallets", Some(payload.clone()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "token not provided");

    let login = register_and_login(&app, "alice@example.com", "correct horse").await;
    let token = login["token"].as_str();

    // the rejected create never reached the handler
    let (status, listed) = send(&app, "GET", "/api/wallets?userId=u1", None, token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));

    let (status, _) = send(&app, "POST", "/api/wallets", Some(payload), token).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_root_and_health() {
    let app = test_app(setup_test_db().await, false);

    for (uri, expected) in [
        ("/", "Web 3 Terminal Backend is running"),
        ("/health", "OK"),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), expected);
    }
}
