//! SQL schema definitions. Each store runs its own batch on open with
//! `IF NOT EXISTS` guards, so first use creates the schema.

/// Mind-map response cache. Append-only: a write always inserts a new row and
/// lookups take the newest; expired rows are ignored, not deleted.
pub const CACHE_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS mindmap_cache (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic TEXT NOT NULL,
    model TEXT NOT NULL,
    response_json TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_cache_topic_model ON mindmap_cache(topic, model);
";

/// Uploaded document metadata, scoped per user.
pub const DOCUMENTS_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    user_email TEXT NOT NULL,
    filename TEXT NOT NULL,
    stored_filename TEXT NOT NULL,
    file_path TEXT NOT NULL,
    file_size INTEGER NOT NULL,
    uploaded_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_documents_user_id ON documents(user_id);
";

/// Registered users. Rows are immutable after creation.
pub const USERS_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
";
