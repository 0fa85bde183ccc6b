//! User registration and login verification.
//!
//! Passwords are stored as `"{salt}${hex(sha256(salt + password))}"`. Rows
//! are immutable after creation; authentication recomputes the digest and
//! compares.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use sha2::{Digest, Sha256};

use mindatlas_core::{now_secs, Error, Result};

use crate::schema::USERS_SCHEMA_SQL;

const MIN_PASSWORD_CHARS: usize = 6;

/// A registered user. The password hash never leaves this module.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub created_at: i64,
}

pub struct UserStore {
    conn: Mutex<Connection>,
}

impl UserStore {
    /// Open or create the users table (shares the documents database file).
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = crate::open_connection(db_path.as_ref(), USERS_SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Register a new user. Email must be unique.
    pub fn create(&self, full_name: &str, email: &str, password: &str) -> Result<UserRecord> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::InvalidInput("A valid email is required".into()));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(Error::InvalidInput(
                "Password must be at least 6 characters".into(),
            ));
        }

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let password_hash = format!("{}${}", salt, digest(&salt, password));
        let created_at = now_secs();

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO users (full_name, email, password_hash, created_at) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .and_then(|mut stmt| {
                stmt.insert(params![full_name.trim(), email, password_hash, created_at])
            })
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint") {
                    Error::Duplicate("Email already registered".into())
                } else {
                    Error::Database(e.to_string())
                }
            })?;

        Ok(UserRecord {
            id,
            full_name: full_name.trim().to_string(),
            email,
            created_at,
        })
    }

    /// Verify an email/password pair. `None` means unknown email or wrong
    /// password — callers should not distinguish the two.
    pub fn verify_login(&self, email: &str, password: &str) -> Result<Option<UserRecord>> {
        let email = email.trim().to_lowercase();
        let conn = self.conn.lock();
        let row: Option<(i64, String, String, i64)> = conn
            .prepare_cached(
                "SELECT id, full_name, password_hash, created_at FROM users WHERE email = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![email], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let (id, full_name, password_hash, created_at) = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        if !verify(&password_hash, password) {
            return Ok(None);
        }

        Ok(Some(UserRecord {
            id,
            full_name,
            email,
            created_at,
        }))
    }

    /// Look up a user by email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let email = email.trim().to_lowercase();
        let conn = self.conn.lock();
        let result = conn
            .prepare_cached(
                "SELECT id, full_name, email, created_at FROM users WHERE email = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![email], |row| {
                Ok(UserRecord {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    email: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })
            .optional()
            .map_err(|e| Error::Database(e.to_string()));
        result
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn verify(stored: &str, password: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, expected)) => digest(salt, password) == expected,
        None => false,
    }
}
