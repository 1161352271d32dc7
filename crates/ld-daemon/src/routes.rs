//! Route handlers for the submission and admin session endpoints.
//!
//! Error mapping at this boundary: validation failures answer 400 with the
//! offending fields, absent/invalid sessions answer 401 (malformed token and
//! unknown account are never distinguished), and storage or configuration
//! problems answer 500 with a generic message -- diagnostic detail is
//! attached only outside production mode.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use ld_db::DbError;
use ld_services::submissions::SubmissionError;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Session cookie lifetime: 7 days.
const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Build the API router.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/consultation",
            post(submit_consultation).get(list_consultations),
        )
        .route("/contact", post(submit_contact))
        .route("/contacts", get(list_contacts))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/check", get(auth_check))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

async fn submit_consultation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ld_core::validate::ConsultationPayload>,
) -> Response {
    match state.submissions.submit_consultation(&payload).await {
        Ok(_) => ok_message("Consultation request submitted successfully"),
        Err(e) => submission_error(&state, e),
    }
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ld_core::validate::ContactPayload>,
) -> Response {
    match state.submissions.submit_contact(&payload).await {
        Ok(_) => ok_message("Message sent successfully!"),
        Err(e) => submission_error(&state, e),
    }
}

async fn list_consultations(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if state.auth.require_session(bearer(&jar)).await.is_err() {
        return unauthorized();
    }

    match state.submissions.list_consultations().await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "consultations": rows }))).into_response(),
        Err(e) => {
            error!("Failed to fetch consultations: {e}");
            internal_error("Failed to fetch consultations")
        }
    }
}

async fn list_contacts(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if state.auth.require_session(bearer(&jar)).await.is_err() {
        return unauthorized();
    }

    match state.submissions.list_contacts().await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "contacts": rows }))).into_response(),
        Err(e) => {
            error!("Failed to fetch contacts: {e}");
            internal_error("Failed to fetch contacts")
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

async fn login(State(state): State<Arc<AppState>>, Json(body): Json<LoginRequest>) -> Response {
    let (username, password) = match (body.username.as_deref(), body.password.as_deref()) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Username and password are required" })),
            )
                .into_response();
        }
    };

    match state.auth.login(username, password).await {
        Ok((token, user)) => {
            let response = (
                StatusCode::OK,
                Json(json!({ "message": "Login successful", "user": user })),
            )
                .into_response();
            with_set_cookie(response, &session_cookie(&token, state.production))
        }
        Err(ld_services::auth::LoginError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response(),
        Err(e) => {
            error!("Login error: {e}");
            internal_error("Failed to login. Please try again.")
        }
    }
}

async fn logout(State(state): State<Arc<AppState>>) -> Response {
    let response = ok_message("Logged out successfully");
    with_set_cookie(response, &expired_session_cookie(state.production))
}

async fn auth_check(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    match state.auth.resolve_session(bearer(&jar)).await {
        Some(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Not authenticated" })),
        )
            .into_response(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn bearer(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(|c| c.value())
}

fn session_cookie(token: &str, production: bool) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_MAX_AGE_SECS}{}",
        if production { "; Secure" } else { "" }
    )
}

fn expired_session_cookie(production: bool) -> String {
    format!(
        "{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
        if production { "; Secure" } else { "" }
    )
}

fn with_set_cookie(mut response: Response, cookie: &str) -> Response {
    // The cookie value is base64, so this parse cannot reasonably fail; if it
    // ever does, the response goes out without the cookie rather than panic.
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

fn ok_message(message: &str) -> Response {
    (StatusCode::OK, Json(json!({ "message": message }))).into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

fn submission_error(state: &AppState, err: SubmissionError) -> Response {
    match err {
        SubmissionError::Validation(failure) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Missing or invalid fields",
                "fields": failure.fields,
            })),
        )
            .into_response(),
        SubmissionError::Database(DbError::Configuration) => {
            error!("Submission rejected: database connection string not configured");
            storage_error(
                state,
                "Server configuration error. Please contact support.",
                "Database connection not configured".to_string(),
            )
        }
        SubmissionError::Database(e) => {
            error!("Submission storage error: {e}");
            storage_error(
                state,
                "Database connection failed. Please try again later.",
                e.to_string(),
            )
        }
    }
}

fn storage_error(state: &AppState, message: &str, details: String) -> Response {
    let body = if state.production {
        json!({ "error": message })
    } else {
        json!({ "error": message, "details": details })
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
