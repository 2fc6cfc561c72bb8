//! End-to-end form login flow over the assembled router.
//!
//! Drives the real route table with an in-memory credential store: sign up,
//! log in, reach the private page, log out, and check that every failure
//! collapses to the same generic redirect.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use pordisto::api;
use pordisto::api::handlers::auth::{AuthConfig, AuthState};
use pordisto::store::{CredentialStore, MemoryCredentialStore, StoreError, UserRecord};
use std::sync::Arc;
use tower::ServiceExt;

// Bcrypt digest of the literal string "password", used to seed accounts
// without going through the signup form.
const PASSWORD_HASH: &str = "{bcrypt}$2a$10$0OsB8/8crrUzT9O8VNJF.uF2sB1c7tpvqJ/COY0Hm9qtoCETRa1cC";

fn app_with_store(store: Arc<dyn CredentialStore>) -> Router {
    let auth_state = Arc::new(AuthState::new(AuthConfig::new(
        "http://localhost:8080".to_string(),
    )));
    api::app(store, auth_state)
}

fn test_app() -> Router {
    app_with_store(Arc::new(MemoryCredentialStore::new()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post_with_cookie(uri: &str, body: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    set_cookie.split(';').next().unwrap_or("").to_string()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Store whose every operation fails, for exercising outage behavior.
struct FailingStore;

#[async_trait]
impl CredentialStore for FailingStore {
    async fn find_by_username(&self, _username: &str) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _record: UserRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn public_pages_render() {
    let app = test_app();

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("This page is public"));

    let response = send(&app, get("/login")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/signup")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn error_flag_toggles_banner() {
    let app = test_app();

    let plain = body_string(send(&app, get("/login")).await).await;
    assert!(!plain.contains("Invalid username or password."));

    let flagged = body_string(send(&app, get("/login?error")).await).await;
    assert!(flagged.contains("Invalid username or password."));

    let flagged = body_string(send(&app, get("/signup?error")).await).await;
    assert!(flagged.contains("Could not create that account."));
}

#[tokio::test]
async fn private_page_requires_a_session() {
    let app = test_app();

    let response = send(&app, get("/private")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    // A forged cookie is as anonymous as no cookie.
    let response = send(&app, get_with_cookie("/private", "pordisto_session=forged")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = send(&app, form_post_with_cookie("/logout", "", "pordisto_session=forged")).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn signup_login_private_logout_journey() {
    let app = test_app();

    // Sign up lands on the login page.
    let response = send(&app, form_post("/signup", "username=alice&password=secret1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    // Log in sets the session cookie and goes home.
    let response = send(&app, form_post("/login", "username=alice&password=secret1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    assert!(set_cookie.starts_with("pordisto_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let cookie = session_cookie(&response);

    // The gate opens for the session.
    let response = send(&app, get_with_cookie("/private", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Hello, alice"));

    // Log out clears the cookie and kills the session.
    let response = send(&app, form_post_with_cookie("/logout", "", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    assert!(cleared.contains("Max-Age=0"));

    let response = send(&app, get_with_cookie("/private", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let store = Arc::new(MemoryCredentialStore::new());
    store
        .insert(UserRecord {
            username: "mallory".to_string(),
            password: PASSWORD_HASH.to_string(),
            enabled: false,
            role: "ADMIN".to_string(),
        })
        .await
        .unwrap();
    let dyn_store: Arc<dyn CredentialStore> = store;
    let app = app_with_store(dyn_store);

    // Seed an enabled account through the public form.
    let response = send(&app, form_post("/signup", "username=bob&password=secret1")).await;
    assert_eq!(location(&response), "/login");

    // Wrong password for an existing user.
    let wrong_password = send(&app, form_post("/login", "username=bob&password=nope")).await;
    // Unknown user entirely.
    let unknown_user = send(&app, form_post("/login", "username=ghost&password=nope")).await;
    // Disabled account, even with its correct password.
    let disabled = send(&app, form_post("/login", "username=mallory&password=password")).await;
    // Input that never reaches the store.
    let malformed = send(&app, form_post("/login", "username=bad%20name&password=x")).await;

    for response in [&wrong_password, &unknown_user, &disabled, &malformed] {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response), "/login?error");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn duplicate_and_outage_signups_collapse() {
    let app = test_app();

    let response = send(&app, form_post("/signup", "username=alice&password=secret1")).await;
    assert_eq!(location(&response), "/login");

    let duplicate = send(&app, form_post("/signup", "username=alice&password=other2")).await;
    assert_eq!(duplicate.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&duplicate), "/signup?error");

    // A store outage produces the exact same redirect.
    let outage_app = app_with_store(Arc::new(FailingStore));
    let outage = send(
        &outage_app,
        form_post("/signup", "username=carol&password=secret1"),
    )
    .await;
    assert_eq!(location(&outage), location(&duplicate));

    // Same for login attempts during the outage.
    let outage_login = send(
        &outage_app,
        form_post("/login", "username=carol&password=secret1"),
    )
    .await;
    assert_eq!(location(&outage_login), "/login?error");
}

#[tokio::test]
async fn health_reports_store_status() {
    let app = test_app();

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("X-App").is_some());

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["database"], "ok");
    assert_eq!(body["name"], "pordisto");

    let outage_app = app_with_store(Arc::new(FailingStore));
    let response = send(&outage_app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["database"], "error");
}
