//! MindAtlas persistence — SQLite-backed cache, document, and user stores.
//!
//! Two independent database files: `cache.db` holds provider response rows,
//! `documents.db` holds document and user metadata. Every store creates its
//! own schema on open. Concurrent access is serialized through a per-store
//! connection mutex; SQLite's transaction semantics handle the rest.

pub mod cache;
pub mod documents;
pub mod schema;
pub mod users;

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::Connection;

use mindatlas_core::{Error, Result};

pub use cache::CacheStore;
pub use documents::{DocumentRecord, DocumentStore};
pub use users::{UserRecord, UserStore};

/// Open a connection with the pragmas every store uses.
fn open_connection(db_path: &Path, schema_sql: &str) -> Result<Mutex<Connection>> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Storage(e.to_string()))?;
    }
    let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         PRAGMA synchronous = NORMAL;",
    )
    .map_err(|e| Error::Database(e.to_string()))?;
    conn.execute_batch(schema_sql)
        .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
    Ok(Mutex::new(conn))
}
