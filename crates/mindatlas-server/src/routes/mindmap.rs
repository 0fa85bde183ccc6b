//! Mind-map generation routes — topic-based and PDF-derived.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as UrlPath, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use mindatlas_core::Error;
use mindatlas_outline::MIN_TEXT_LEN;

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mindmap", get(topic_mindmap))
        .route("/pdf-mindmap/{doc_id}", get(pdf_mindmap))
}

#[derive(Debug, Deserialize)]
struct MindmapQuery {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    nocache: String,
}

/// GET /api/mindmap?topic=...&nocache=1 — generate a mind map for a topic.
async fn topic_mindmap(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MindmapQuery>,
) -> impl IntoResponse {
    let topic = query.topic.trim();
    if topic.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing 'topic' query parameter" })),
        );
    }

    let bypass_cache = query.nocache.trim() == "1";
    match state.generator.generate(topic, &state.cache, bypass_cache).await {
        Ok(map) => match serde_json::to_value(&map) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => error_response(&Error::Json(e)),
        },
        Err(e) => error_response(&e),
    }
}

/// GET /api/pdf-mindmap/{doc_id} — outline an uploaded PDF locally.
async fn pdf_mindmap(
    State(state): State<Arc<AppState>>,
    UrlPath(doc_id): UrlPath<i64>,
) -> impl IntoResponse {
    let record = match state.documents.get(doc_id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            return error_response(&Error::NotFound("Document not found".into()));
        }
        Err(e) => return error_response(&e),
    };

    let file_path = Path::new(&record.file_path);
    if !file_path.exists() {
        return error_response(&Error::NotFound("PDF file not found on server".into()));
    }

    let text = match state.extractor.extract(file_path) {
        Ok(text) => text,
        Err(e) => {
            return error_response(&Error::Extraction(e.to_string()));
        }
    };

    if text.chars().count() < MIN_TEXT_LEN {
        return error_response(&Error::InvalidInput(
            "Could not extract meaningful text from PDF".into(),
        ));
    }

    let map = state.outliner.outline(&text);
    match serde_json::to_value(&map) {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => error_response(&Error::Json(e)),
    }
}
