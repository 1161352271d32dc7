//! End-to-end tests over the full router: submission, session, and admin
//! retrieval flows against a temporary SQLite database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Local, Utc};
use http_body_util::BodyExt;
use ld_daemon::routes::{self, SESSION_COOKIE};
use ld_daemon::state::AppState;
use ld_db::{queries, Database};
use ld_services::auth::AuthService;
use ld_services::submissions::SubmissionService;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "correct horse battery";

async fn test_app(dir: &TempDir) -> Router {
    let url = format!("sqlite://{}/api.db?mode=rwc", dir.path().display());
    let db = Arc::new(Database::new(Some(url)));

    let pool = db.pool().await.unwrap();
    let hash = ld_core::password::hash_password(ADMIN_PASSWORD).unwrap();
    queries::create_admin(&pool, "admin", &hash).await.unwrap();

    let state = Arc::new(AppState {
        submissions: SubmissionService::new(db.clone()),
        auth: AuthService::new(db),
        production: false,
    });
    routes::api_router(state)
}

async fn request(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, set_cookie, json)
}

async fn login(app: &Router) -> String {
    let (status, set_cookie, _) = request(
        app,
        "POST",
        "/auth/login",
        Some(json!({ "username": "admin", "password": ADMIN_PASSWORD })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // "admin_session=<token>" up to the first attribute.
    set_cookie
        .expect("login must set the session cookie")
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn contact_body() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "(555) 123-4567",
        "service": "family-law",
        "message": "Please call me back."
    })
}

#[tokio::test]
async fn contact_submission_end_to_end() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Valid submission is accepted.
    let (status, _, body) = request(&app, "POST", "/contact", Some(contact_body()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Message sent successfully!");

    // Reading back without a session is refused.
    let (status, _, body) = request(&app, "GET", "/contacts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    // A fresh session sees the record as the newest entry.
    let cookie = login(&app).await;
    let (status, _, body) = request(&app, "GET", "/contacts", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let contacts = body["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["email"], "jane@example.com");
    assert_eq!(contacts[0]["status"], "new");
}

#[tokio::test]
async fn consultation_with_yesterdays_date_is_rejected_naming_date() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let yesterday = (Local::now().date_naive() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let body = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "5551234567",
        "practiceArea": "family-law",
        "date": yesterday,
        "time": "10:00"
    });

    let (status, _, body) = request(&app, "POST", "/consultation", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["date"].is_string());
}

#[tokio::test]
async fn consultation_listing_requires_session() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let body = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "5551234567",
        "practiceArea": "criminal-defense",
        "date": "2099-01-15",
        "time": "14:00",
        "message": "Urgent."
    });
    let (status, _, _) = request(&app, "POST", "/consultation", Some(body), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = request(&app, "GET", "/consultation", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let cookie = login(&app).await;
    let (status, _, body) = request(&app, "GET", "/consultation", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["consultations"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["practiceArea"], "criminal-defense");
    assert_eq!(rows[0]["status"], "pending");
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, _, body) = request(&app, "POST", "/contact", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["name", "email", "phone", "service", "message"] {
        assert!(body["fields"][field].is_string(), "missing field: {field}");
    }
}

#[tokio::test]
async fn login_failures_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status_a, _, body_a) = request(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "username": "admin", "password": "wrong" })),
        None,
    )
    .await;
    let (status_b, _, body_b) = request(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "username": "nosuchuser", "password": "wrong" })),
        None,
    )
    .await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);
    assert_eq!(body_a["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_missing_fields_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    for body in [
        json!({ "username": "admin" }),
        json!({ "password": "something" }),
        json!({ "username": "", "password": "" }),
    ] {
        let (status, _, body) = request(&app, "POST", "/auth/login", Some(body), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username and password are required");
    }
}

#[tokio::test]
async fn login_sets_cookie_attributes() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, set_cookie, body) = request(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "username": "admin", "password": ADMIN_PASSWORD })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], "admin");
    assert!(body["user"].get("password_hash").is_none());

    let cookie = set_cookie.unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=604800"));
    // Development mode: no Secure attribute.
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn bad_sessions_are_indistinguishable_401s() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Token for an admin id that does not exist.
    let ghost = ld_core::token::encode(9999, Utc::now());

    let no_cookie = request(&app, "GET", "/contacts", None, None).await;
    let malformed = request(
        &app,
        "GET",
        "/contacts",
        None,
        Some(&format!("{SESSION_COOKIE}=garbage")),
    )
    .await;
    let unknown = request(
        &app,
        "GET",
        "/contacts",
        None,
        Some(&format!("{SESSION_COOKIE}={ghost}")),
    )
    .await;

    for response in [&no_cookie, &malformed, &unknown] {
        assert_eq!(response.0, StatusCode::UNAUTHORIZED);
        assert_eq!(response.2, no_cookie.2);
    }
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, set_cookie, body) = request(&app, "POST", "/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    let cookie = set_cookie.unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=;")));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn auth_check_reports_session_state() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, _, body) = request(&app, "GET", "/auth/check", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");

    let cookie = login(&app).await;
    let (status, _, body) = request(&app, "GET", "/auth/check", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
async fn missing_database_url_is_a_generic_500() {
    let db = Arc::new(Database::new(None));
    let state = Arc::new(AppState {
        submissions: SubmissionService::new(db.clone()),
        auth: AuthService::new(db),
        production: true,
    });
    let app = routes::api_router(state);

    let (status, _, body) = request(&app, "POST", "/contact", Some(contact_body()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Server configuration error. Please contact support."
    );
    // Production mode never leaks diagnostic detail.
    assert!(body.get("details").is_none());
}
