//! Append-only TTL cache for generated mind maps, keyed by `(topic, model)`.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use mindatlas_core::{now_secs, Error, MindMapResponse, Result};

use crate::schema::CACHE_SCHEMA_SQL;

pub struct CacheStore {
    conn: Mutex<Connection>,
    ttl_secs: i64,
}

impl CacheStore {
    /// Open or create the cache database at `db_path`.
    pub fn open(db_path: impl AsRef<Path>, ttl_secs: i64) -> Result<Self> {
        let conn = crate::open_connection(db_path.as_ref(), CACHE_SCHEMA_SQL)?;
        Ok(Self { conn, ttl_secs })
    }

    /// Most recent unexpired entry for `(topic, model)`, or `None`.
    pub fn get(&self, topic: &str, model: &str) -> Result<Option<MindMapResponse>> {
        self.get_at(topic, model, now_secs())
    }

    /// Lookup against an explicit clock. Rows older than the TTL are treated
    /// as absent without being deleted; unparseable or malformed payloads are
    /// treated as absent too.
    pub fn get_at(&self, topic: &str, model: &str, now: i64) -> Result<Option<MindMapResponse>> {
        let conn = self.conn.lock();
        let row: Option<(String, i64)> = conn
            .prepare_cached(
                "SELECT response_json, created_at FROM mindmap_cache \
                 WHERE topic = ?1 AND model = ?2 ORDER BY id DESC LIMIT 1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![topic, model], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let (response_json, created_at) = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        if now - created_at > self.ttl_secs {
            debug!(topic, model, "cache entry expired");
            return Ok(None);
        }

        match serde_json::from_str::<MindMapResponse>(&response_json) {
            Ok(parsed) if parsed.is_well_formed() => Ok(Some(parsed)),
            _ => Ok(None),
        }
    }

    /// Insert a new row for `(topic, model)`. Always appends; earlier rows
    /// for the same key are superseded, never updated.
    pub fn put(&self, topic: &str, model: &str, response: &MindMapResponse) -> Result<()> {
        self.put_at(topic, model, response, now_secs())
    }

    /// Insert with an explicit creation timestamp.
    pub fn put_at(
        &self,
        topic: &str,
        model: &str,
        response: &MindMapResponse,
        created_at: i64,
    ) -> Result<()> {
        let json = serde_json::to_string(response)?;
        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO mindmap_cache (topic, model, response_json, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![topic, model, json, created_at])
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Best-effort write: failures are logged and swallowed. A cache-write
    /// failure must never fail the request that produced the response.
    pub fn put_best_effort(&self, topic: &str, model: &str, response: &MindMapResponse) {
        if let Err(e) = self.put(topic, model, response) {
            warn!(topic, model, "cache write failed: {}", e);
        }
    }

    /// Physical row count, including expired rows.
    pub fn entry_count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM mindmap_cache", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindatlas_core::config::CACHE_TTL_SECS;
    use mindatlas_core::MindMapNode;
    use tempfile::TempDir;

    fn test_store() -> (CacheStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::open(dir.path().join("cache.db"), CACHE_TTL_SECS).unwrap();
        (store, dir)
    }

    fn sample(topic: &str) -> MindMapResponse {
        MindMapResponse {
            topic: topic.into(),
            root: MindMapNode {
                title: topic.into(),
                bullet_points: vec!["a point".into()],
                children: vec![MindMapNode::titled("Overview")],
                ..Default::default()
            },
        }
    }

    #[test]
    fn round_trip() {
        let (store, _dir) = test_store();
        let response = sample("Solar Energy");
        store.put("Solar Energy", "gemini-2.5-pro", &response).unwrap();

        let hit = store.get("Solar Energy", "gemini-2.5-pro").unwrap().unwrap();
        assert_eq!(hit, response);
    }

    #[test]
    fn miss_on_other_key() {
        let (store, _dir) = test_store();
        store.put("Solar Energy", "gemini-2.5-pro", &sample("Solar Energy")).unwrap();

        assert!(store.get("Solar Energy", "gemini-1.5-flash").unwrap().is_none());
        assert!(store.get("Wind Energy", "gemini-2.5-pro").unwrap().is_none());
    }

    #[test]
    fn expired_entry_absent_but_row_retained() {
        let (store, _dir) = test_store();
        let response = sample("Solar Energy");
        let written_at = 1_700_000_000;
        store
            .put_at("Solar Energy", "gemini-2.5-pro", &response, written_at)
            .unwrap();

        // Just inside the TTL: still a hit.
        let hit = store
            .get_at("Solar Energy", "gemini-2.5-pro", written_at + CACHE_TTL_SECS)
            .unwrap();
        assert!(hit.is_some());

        // Past the TTL: absent, yet the row is still in storage.
        let miss = store
            .get_at("Solar Energy", "gemini-2.5-pro", written_at + CACHE_TTL_SECS + 1)
            .unwrap();
        assert!(miss.is_none());
        assert_eq!(store.entry_count().unwrap(), 1);
    }

    #[test]
    fn newest_row_wins() {
        let (store, _dir) = test_store();
        let first = sample("Topic");
        let mut second = sample("Topic");
        second.root.title = "Topic revised".into();

        store.put_at("Topic", "m", &first, 100).unwrap();
        store.put_at("Topic", "m", &second, 200).unwrap();

        let hit = store.get_at("Topic", "m", 300).unwrap().unwrap();
        assert_eq!(hit.root.title, "Topic revised");
        assert_eq!(store.entry_count().unwrap(), 2);
    }

    #[test]
    fn unparseable_payload_is_absent() {
        let (store, _dir) = test_store();
        {
            let conn = store.conn.lock();
            conn.execute(
                "INSERT INTO mindmap_cache (topic, model, response_json, created_at) \
                 VALUES ('t', 'm', 'not json', ?1)",
                params![now_secs()],
            )
            .unwrap();
        }
        assert!(store.get("t", "m").unwrap().is_none());
    }
}
