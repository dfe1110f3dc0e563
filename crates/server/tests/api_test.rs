//! Integration tests for API endpoints.
//!
//! The router is driven with `oneshot` against in-memory stores, so no
//! database or Redis connection is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use common::{AppError, AppResult};
use domain::{Account, Role};
use server_lib::config::{ServerConfig, StoreBackend};
use server_lib::routes::create_router;
use server_lib::state::AppState;
use server_lib::store::{Document, DocumentStore, KeyValueStore, MemoryDocumentStore};

// =============================================================================
// Stubs
// =============================================================================

/// Document store whose backend is unreachable.
struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert(&self, _: &str, _: Map<String, Value>) -> AppResult<Document> {
        Err(AppError::internal("unreachable"))
    }

    async fn get(&self, _: &str, _: &str) -> AppResult<Option<Document>> {
        Err(AppError::internal("unreachable"))
    }

    async fn list(&self, _: &str) -> AppResult<Vec<Document>> {
        Err(AppError::internal("unreachable"))
    }

    async fn find_by_field(&self, _: &str, _: &str, _: &Value) -> AppResult<Vec<Document>> {
        Err(AppError::internal("unreachable"))
    }

    async fn update(
        &self,
        _: &str,
        _: &str,
        _: Map<String, Value>,
    ) -> AppResult<Option<Document>> {
        Err(AppError::internal("unreachable"))
    }

    async fn delete(&self, _: &str, _: &str) -> AppResult<bool> {
        Err(AppError::internal("unreachable"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::internal("unreachable"))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn test_config(max_requests: u64) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.session.secret = "test-secret-key-for-testing-only-32chars".to_string();
    config.rate_limit.max_requests = max_requests;
    config.store_backend = StoreBackend::Memory;
    config
}

fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryDocumentStore::new()),
        KeyValueStore::in_memory(),
        test_config(1000),
    )
}

fn session(state: &AppState, id: &str, role: Role) -> String {
    state
        .sessions
        .issue(id, &format!("{}@example.com", id), role)
        .unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn property_body(location: &str) -> Value {
    json!({
        "category": "Condominium",
        "location": location,
        "status": "available",
        "property_pics": ["front.jpg"],
        "price": "4500000",
        "no_of_bedrooms": 2,
        "no_of_bathrooms": 1,
        "square_meter": 48
    })
}

fn account(id: &str, role: Role) -> Account {
    Account {
        id: id.to_string(),
        name: format!("Account {}", id),
        email: format!("{}@example.com", id),
        role,
        address: None,
        contact_number: None,
    }
}

// =============================================================================
// Session & required fields
// =============================================================================

#[tokio::test]
async fn test_missing_session_is_bad_request() {
    let app = create_router(test_state());

    let (status, body) = send(
        &app,
        request("POST", "/api/property/create", None, Some(property_body("Makati"))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing session");
}

#[tokio::test]
async fn test_invalid_token_is_missing_session() {
    let app = create_router(test_state());

    let (status, body) = send(&app, request("GET", "/api/payment/get-all", Some("garbage"), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_SESSION");
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let state = test_state();
    let token = session(&state, "agent-1", Role::Agent);
    let app = create_router(state);

    let request = Request::builder()
        .uri("/api/appointment/get-all")
        .header(header::COOKIE, format!("session={}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointments"], json!([]));
}

#[tokio::test]
async fn test_missing_fields_are_listed() {
    let state = test_state();
    let token = session(&state, "admin-1", Role::Admin);
    let app = create_router(state);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/property/create",
            Some(&token),
            Some(json!({"category": "House", "status": "available"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Missing required fields: location, property_pics, price, no_of_bedrooms, no_of_bathrooms, square_meter"
    );
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn test_update_normalizes_timestamps_to_strings() {
    let state = test_state();
    let token = session(&state, "admin-1", Role::Admin);
    let app = create_router(state);

    let (status, created) = send(
        &app,
        request("POST", "/api/property/create", Some(&token), Some(property_body("BGC"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_null());
    assert!(created["user"].is_null());

    let (status, updated) = send(
        &app,
        request(
            "PATCH",
            "/api/property/update",
            Some(&token),
            Some(json!({"id": created["id"], "price": "4800000"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], "4800000");
    assert_eq!(updated["location"], "BGC");
    assert!(updated["created_at"].is_string());
    assert!(updated["updated_at"].is_string());
}

#[tokio::test]
async fn test_location_conflict_performs_no_write() {
    let state = test_state();
    let token = session(&state, "admin-1", Role::Admin);
    let app = create_router(state);

    let (_, first) = send(
        &app,
        request("POST", "/api/property/create", Some(&token), Some(property_body("Ortigas"))),
    )
    .await;
    send(
        &app,
        request("POST", "/api/property/create", Some(&token), Some(property_body("Alabang"))),
    )
    .await;

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            "/api/property/update",
            Some(&token),
            Some(json!({"id": first["id"], "location": "Alabang", "price": "1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"]["message"],
        "A property with this location already exists"
    );

    let uri = format!("/api/property/get?id={}", first["id"].as_str().unwrap());
    let (_, unchanged) = send(&app, request("GET", &uri, Some(&token), None)).await;
    assert_eq!(unchanged["location"], "Ortigas");
    assert_eq!(unchanged["price"], "4500000");
    assert!(unchanged["updated_at"].is_null());
}

#[tokio::test]
async fn test_duplicate_location_on_create_conflicts() {
    let state = test_state();
    let token = session(&state, "agent-1", Role::Agent);
    let app = create_router(state);

    send(
        &app,
        request("POST", "/api/property/create", Some(&token), Some(property_body("Tagaytay"))),
    )
    .await;
    let (status, _) = send(
        &app,
        request("POST", "/api/property/create", Some(&token), Some(property_body("Tagaytay"))),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_all_paginates() {
    let state = test_state();
    let token = session(&state, "admin-1", Role::Admin);
    let app = create_router(state);

    for location in ["Antipolo", "Marikina", "Pasig"] {
        send(
            &app,
            request("POST", "/api/property/create", Some(&token), Some(property_body(location))),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        request("GET", "/api/property/get-all?page=2&limit=2", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["properties"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
}

#[tokio::test]
async fn test_client_cannot_mutate_properties() {
    let state = test_state();
    let token = session(&state, "client-1", Role::Client);
    let app = create_router(state);

    let (status, body) = send(
        &app,
        request("POST", "/api/property/create", Some(&token), Some(property_body("Cainta"))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, _) = send(
        &app,
        request("DELETE", "/api/property/delete?id=p1", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(&app, request("GET", "/api/property/get-all", Some(&token), None)).await;
    assert_eq!(body["properties"], json!([]));
}

#[tokio::test]
async fn test_client_cannot_create_payments_but_books_appointments() {
    let state = test_state();
    let token = session(&state, "client-1", Role::Client);
    let app = create_router(state);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/payment/create",
            Some(&token),
            Some(json!({"property": "p1", "amount": 1500.0})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/appointment/create",
            Some(&token),
            Some(json!({"user": "client-1", "date": "2024-06-01T09:00:00Z"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], "client-1");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_account_delete_status_codes() {
    let state = test_state();
    state
        .kv
        .save_accounts(&[account("a1", Role::Agent), account("a2", Role::Client)])
        .await
        .unwrap();
    let token = session(&state, "admin-1", Role::Admin);
    let app = create_router(state);

    let (status, body) = send(&app, request("DELETE", "/api/auth/delete", Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No ID provided");

    let (status, _) = send(
        &app,
        request("DELETE", "/api/auth/delete?id=ghost", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        request("DELETE", "/api/auth/delete?id=a1", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accounts"].as_array().unwrap().len(), 1);
    assert_eq!(body["accounts"][0]["id"], "a2");
}

#[tokio::test]
async fn test_account_delete_checks_session_before_id() {
    let app = create_router(test_state());

    let (status, body) = send(&app, request("DELETE", "/api/auth/delete", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_SESSION");
}

#[tokio::test]
async fn test_non_admin_cannot_create_accounts() {
    let state = test_state();
    let token = session(&state, "agent-1", Role::Agent);
    let app = create_router(state);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/create",
            Some(&token),
            Some(json!({"name": "New", "email": "new@example.com", "role": "client"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_admin_updates_only_own_account_without_role() {
    let state = test_state();
    state
        .kv
        .save_accounts(&[account("c1", Role::Client), account("c2", Role::Client)])
        .await
        .unwrap();
    let token = session(&state, "c1", Role::Client);
    let app = create_router(state);

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            "/api/auth/update",
            Some(&token),
            Some(json!({"id": "c1", "address": "Iloilo City"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "Iloilo City");

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/auth/update",
            Some(&token),
            Some(json!({"id": "c1", "role": "admin"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/auth/update",
            Some(&token),
            Some(json!({"id": "c2", "name": "Hijacked"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Rate limiting & health
// =============================================================================

#[tokio::test]
async fn test_rate_limit_runs_before_session_check() {
    let state = AppState::new(
        Arc::new(MemoryDocumentStore::new()),
        KeyValueStore::in_memory(),
        test_config(2),
    );
    let app = create_router(state);

    for _ in 0..2 {
        let (status, _) = send(&app, request("GET", "/api/payment/get-all", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let response = app
        .clone()
        .oneshot(request("GET", "/api/payment/get-all", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("Retry-After"));
}

#[tokio::test]
async fn test_health_reports_store_status() {
    let app = create_router(test_state());
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let degraded = AppState::new(
        Arc::new(UnreachableStore),
        KeyValueStore::in_memory(),
        test_config(1000),
    );
    let app = create_router(degraded);
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["services"]["documents"]["status"], "unhealthy");
}
