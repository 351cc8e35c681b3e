use std::env;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use ogig_backend::store::memory::{MemoryJobStore, MemoryProfileStore};
use ogig_backend::{routes, AppState};

fn test_state() -> AppState {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/unused");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("GEMINI_API_KEY", "test-key");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("ADMIN_RPS", "100");
    let _ = ogig_backend::config::init_config();

    AppState::with_stores(
        Arc::new(MemoryJobStore::new()),
        Arc::new(MemoryProfileStore::new()),
    )
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(routes::auth::sign_up))
        .route("/api/auth/signin", post(routes::auth::sign_in))
        .route("/api/auth/reset/request", post(routes::auth::request_reset))
        .route("/api/auth/reset/confirm", post(routes::auth::confirm_reset))
        .with_state(state)
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> axum::response::Response {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn json_body(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn employer_signup() -> JsonValue {
    json!({
        "display_name": "Bisi",
        "email": "bisi@example.com",
        "password": "correct-horse",
        "role": "EMPLOYER",
        "business_name": "Bisi Logistics",
        "business_address": "12 Allen Avenue, Ikeja",
        "is_legally_registered": true,
        "contact_phone": "08012345678"
    })
}

#[tokio::test]
async fn sign_up_opens_a_session_with_the_new_profile() {
    let app = app(test_state());

    let resp = post_json(&app, "/api/auth/signup", employer_signup()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;

    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["profile"]["role"], json!("EMPLOYER"));
    assert_eq!(body["profile"]["business_name"], json!("Bisi Logistics"));
    assert_eq!(body["profile"]["skills"], json!([]));
    assert!(body["profile"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_cannot_sign_up_twice() {
    let app = app(test_state());

    post_json(&app, "/api/auth/signup", employer_signup()).await;
    let resp = post_json(&app, "/api/auth/signup", employer_signup()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejected_credentials_map_to_fixed_messages() {
    let app = app(test_state());
    post_json(&app, "/api/auth/signup", employer_signup()).await;

    let resp = post_json(
        &app,
        "/api/auth/signin",
        json!({ "email": "ghost@example.com", "password": "whatever-pass" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["error"], json!("No account found with this email."));

    let resp = post_json(
        &app,
        "/api/auth/signin",
        json!({ "email": "bisi@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["error"], json!("Incorrect password."));
}

#[tokio::test]
async fn password_reset_flow_ends_with_a_working_sign_in() {
    let app = app(test_state());
    post_json(&app, "/api/auth/signup", employer_signup()).await;

    let resp = post_json(
        &app,
        "/api/auth/reset/request",
        json!({ "email": "bisi@example.com" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let token = body["reset_token"].as_str().unwrap().to_string();

    let resp = post_json(
        &app,
        "/api/auth/reset/confirm",
        json!({ "token": token, "new_password": "brand-new-pass" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = post_json(
        &app,
        "/api/auth/signin",
        json!({ "email": "bisi@example.com", "password": "brand-new-pass" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}
