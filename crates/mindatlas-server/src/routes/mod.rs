//! HTTP route handlers.

pub mod auth;
pub mod documents;
pub mod mindmap;

use std::sync::Arc;

use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use mindatlas_core::Error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(mindmap::routes())
        .merge(documents::routes())
        .merge(auth::routes())
        .fallback(api_not_found)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// API paths answer 404 in JSON, never HTML.
async fn api_not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "path": uri.path() })),
    )
}

const MODEL_HINT: &str =
    "Try creating an API key at https://aistudio.google.com/app/apikey and set GEMINI_API_KEY.";

/// Map a core error to its HTTP response. `Network` and `UpstreamRejected`
/// never reach this point on the generation path (they resolve to the
/// fallback first); if one does, it is a server error.
pub(crate) fn error_response(err: &Error) -> (StatusCode, Json<Value>) {
    let status = match err {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Duplicate(_) => StatusCode::CONFLICT,
        Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        Error::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = match err {
        Error::UpstreamUnavailable(msg) => json!({ "error": msg, "hint": MODEL_HINT }),
        _ => json!({ "error": err.to_string() }),
    };

    (status, Json(body))
}
