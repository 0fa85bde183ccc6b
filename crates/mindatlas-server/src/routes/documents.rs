//! Document routes — PDF upload, per-user listing, deletion.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use mindatlas_core::config::MAX_UPLOAD_BYTES;
use mindatlas_core::Error;

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/upload-pdf",
            post(upload_pdf).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/user-documents", get(user_documents))
        .route("/delete-document/{doc_id}", delete(delete_document))
}

/// POST /api/upload-pdf — multipart upload with `pdf`, `user_id`,
/// `user_email` fields.
async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut filename: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;
    let mut user_id = String::new();
    let mut user_email = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // The body-limit layer surfaces an overlong request here.
            Err(_) => return error_response(&Error::PayloadTooLarge),
        };

        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("pdf") => {
                filename = field.file_name().map(|n| n.to_string());
                match field.bytes().await {
                    Ok(data) => bytes = Some(data.to_vec()),
                    Err(_) => return error_response(&Error::PayloadTooLarge),
                }
            }
            Some("user_id") => {
                user_id = field.text().await.unwrap_or_default();
            }
            Some("user_email") => {
                user_email = field.text().await.unwrap_or_default();
            }
            _ => {}
        }
    }

    let (filename, bytes) = match (filename, bytes) {
        (Some(name), Some(bytes)) => (name, bytes),
        _ => {
            return error_response(&Error::InvalidInput("No file provided".into()));
        }
    };

    match state
        .documents
        .save_upload(&user_id, &user_email, &filename, &bytes)
    {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "File uploaded successfully",
                "document_id": record.id,
                "filename": record.filename,
                "size": record.file_size,
            })),
        ),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
struct UserDocumentsQuery {
    #[serde(default)]
    user_id: String,
}

/// GET /api/user-documents?user_id=... — list a user's documents, newest
/// first.
async fn user_documents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserDocumentsQuery>,
) -> impl IntoResponse {
    let user_id = query.user_id.trim();
    if user_id.is_empty() {
        return error_response(&Error::InvalidInput("User ID required".into()));
    }

    match state.documents.list_for(user_id) {
        Ok(records) => {
            let documents: Vec<_> = records
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id,
                        "filename": r.filename,
                        "file_size": r.file_size,
                        "uploaded_at": r.uploaded_at,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "documents": documents })))
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/delete-document/{doc_id} — remove the row, then best-effort
/// the file.
async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<i64>,
) -> impl IntoResponse {
    match state.documents.delete(doc_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Document deleted successfully" })),
        ),
        Err(e) => error_response(&e),
    }
}
