//! Uploaded-document metadata and file lifecycle.
//!
//! `save_upload` validates everything before touching disk, and removes the
//! just-written file when the metadata insert fails — the database row is the
//! source of truth and files never outlive it. `delete` goes the other way:
//! row first, then best-effort file removal.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::warn;

use mindatlas_core::{now_secs, Error, Result};

use crate::schema::DOCUMENTS_SCHEMA_SQL;

/// Metadata for one uploaded PDF, owned by the uploading user.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub user_id: String,
    pub user_email: String,
    pub filename: String,
    pub stored_filename: String,
    pub file_path: String,
    pub file_size: i64,
    pub uploaded_at: i64,
}

pub struct DocumentStore {
    conn: Mutex<Connection>,
    uploads_dir: PathBuf,
    max_upload_bytes: usize,
}

impl DocumentStore {
    /// Open or create the documents database and bind the uploads directory.
    pub fn open(
        db_path: impl AsRef<Path>,
        uploads_dir: impl AsRef<Path>,
        max_upload_bytes: usize,
    ) -> Result<Self> {
        let uploads_dir = uploads_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&uploads_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let conn = crate::open_connection(db_path.as_ref(), DOCUMENTS_SCHEMA_SQL)?;
        Ok(Self {
            conn,
            uploads_dir,
            max_upload_bytes,
        })
    }

    /// Persist an upload: validate, write the file, insert the row.
    ///
    /// The stored name is namespaced by user id and upload timestamp. If the
    /// metadata insert fails after the file was written, the file is removed
    /// before the error propagates.
    pub fn save_upload(
        &self,
        user_id: &str,
        user_email: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<DocumentRecord> {
        let user_id = user_id.trim();
        let user_email = user_email.trim();
        if user_id.is_empty() || user_email.is_empty() {
            return Err(Error::Unauthenticated(
                "User authentication required".into(),
            ));
        }
        if filename.is_empty() {
            return Err(Error::InvalidInput("No file selected".into()));
        }
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(Error::InvalidInput("Only PDF files are allowed".into()));
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(Error::PayloadTooLarge);
        }

        let uploaded_at = now_secs();
        let stored_filename = format!(
            "{}_{}_{}",
            sanitize_filename(user_id),
            uploaded_at,
            sanitize_filename(filename)
        );
        let file_path = self.uploads_dir.join(&stored_filename);
        let file_path_str = file_path.to_string_lossy().to_string();

        std::fs::write(&file_path, bytes).map_err(|e| Error::Storage(e.to_string()))?;

        let insert = {
            let conn = self.conn.lock();
            conn.prepare_cached(
                "INSERT INTO documents \
                 (user_id, user_email, filename, stored_filename, file_path, file_size, uploaded_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .and_then(|mut stmt| {
                stmt.insert(params![
                    user_id,
                    user_email,
                    filename,
                    stored_filename,
                    file_path_str,
                    bytes.len() as i64,
                    uploaded_at,
                ])
            })
        };

        let id = match insert {
            Ok(id) => id,
            Err(e) => {
                // No orphaned files: undo the write before reporting.
                if let Err(rm) = std::fs::remove_file(&file_path) {
                    warn!("failed to remove file after insert error: {}", rm);
                }
                return Err(Error::Database(e.to_string()));
            }
        };

        Ok(DocumentRecord {
            id,
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
            filename: filename.to_string(),
            stored_filename,
            file_path: file_path_str,
            file_size: bytes.len() as i64,
            uploaded_at,
        })
    }

    /// All documents for a user, newest first.
    pub fn list_for(&self, user_id: &str) -> Result<Vec<DocumentRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT * FROM documents WHERE user_id = ?1 ORDER BY uploaded_at DESC, id DESC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![user_id], |row| Ok(Self::row_to_record(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Get a document by id.
    pub fn get(&self, id: i64) -> Result<Option<DocumentRecord>> {
        let conn = self.conn.lock();
        let result = conn
            .prepare_cached("SELECT * FROM documents WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], |row| Ok(Self::row_to_record(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()));
        result
    }

    /// Delete a document: row first, then best-effort file removal. A failed
    /// file removal is logged and does not roll back the row deletion.
    pub fn delete(&self, id: i64) -> Result<()> {
        let file_path: Option<String> = {
            let conn = self.conn.lock();
            let path = conn
                .prepare_cached("SELECT file_path FROM documents WHERE id = ?1")
                .map_err(|e| Error::Database(e.to_string()))?
                .query_row(params![id], |row| row.get(0))
                .optional()
                .map_err(|e| Error::Database(e.to_string()))?;

            match path {
                Some(p) => {
                    conn.execute("DELETE FROM documents WHERE id = ?1", params![id])
                        .map_err(|e| Error::Database(e.to_string()))?;
                    Some(p)
                }
                None => None,
            }
        };

        let file_path = file_path.ok_or_else(|| Error::NotFound("Document not found".into()))?;
        let path = Path::new(&file_path);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(document_id = id, "file removal after delete failed: {}", e);
            }
        }
        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> DocumentRecord {
        DocumentRecord {
            id: row.get("id").unwrap_or(0),
            user_id: row.get("user_id").unwrap_or_default(),
            user_email: row.get("user_email").unwrap_or_default(),
            filename: row.get("filename").unwrap_or_default(),
            stored_filename: row.get("stored_filename").unwrap_or_default(),
            file_path: row.get("file_path").unwrap_or_default(),
            file_size: row.get("file_size").unwrap_or(0),
            uploaded_at: row.get("uploaded_at").unwrap_or(0),
        }
    }
}

/// Strip path components so a hostile filename cannot escape the uploads dir.
fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "").replace("..", "");
    let cleaned = Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
