//! Registration, login, and session routes.
//!
//! Sessions are bearer tokens held in process memory; the transport (cookie
//! vs. header) is the frontend's concern. The token is accepted from the
//! `X-Session-Token` header or a `token` query parameter.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use mindatlas_core::Error;

use crate::routes::error_response;
use crate::state::{AppState, SessionUser};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/session", get(session))
        .route("/logout", post(logout))
        .route("/forgot", post(forgot))
}

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    #[serde(default, rename = "fullName")]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// POST /api/register — create an account.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> impl IntoResponse {
    match state
        .users
        .create(&payload.full_name, &payload.email, &payload.password)
    {
        Ok(_) => (StatusCode::OK, Json(json!({ "ok": true }))),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// POST /api/login — verify credentials and issue a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> impl IntoResponse {
    match state.users.verify_login(&payload.email, &payload.password) {
        Ok(Some(user)) => {
            let session_user = SessionUser::from(user);
            let token = state.create_session(session_user.clone());
            (
                StatusCode::OK,
                Json(json!({ "ok": true, "token": token, "user": session_user })),
            )
        }
        Ok(None) => error_response(&Error::Unauthenticated(
            "Invalid email or password".into(),
        )),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    #[serde(default)]
    token: String,
}

fn token_from(headers: &HeaderMap, query: &TokenQuery) -> Option<String> {
    if let Some(value) = headers.get("x-session-token").and_then(|v| v.to_str().ok()) {
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    let token = query.token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// GET /api/session — introspect the current session.
async fn session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<TokenQuery>,
) -> impl IntoResponse {
    let user = token_from(&headers, &query).and_then(|token| state.session_for(&token));
    match user {
        Some(user) => (StatusCode::OK, Json(json!({ "ok": true, "user": user }))),
        None => error_response(&Error::Unauthenticated("Not signed in".into())),
    }
}

/// POST /api/logout — revoke the session token. Idempotent.
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<TokenQuery>,
) -> impl IntoResponse {
    if let Some(token) = token_from(&headers, &query) {
        state.revoke_session(&token);
    }
    (StatusCode::OK, Json(json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
struct ForgotPayload {
    #[serde(default)]
    email: String,
}

/// POST /api/forgot — demo password-reset endpoint. Answers the same way
/// whether or not the account exists.
async fn forgot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPayload>,
) -> impl IntoResponse {
    if let Err(e) = state.users.find_by_email(&payload.email) {
        return error_response(&e);
    }
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "message": "If this account exists, a reset link will be emailed.",
        })),
    )
}
