//! Configuration and data directory management.
//!
//! Built once at process start and passed by reference into every component
//! constructor. Business logic never reads the environment directly.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cached provider responses expire after one hour.
pub const CACHE_TTL_SECS: i64 = 3600;

/// Maximum accepted upload size (16 MiB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Per-request timeout for outbound provider calls.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Paths to all MindAtlas data locations.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// PDF uploads directory (`data/uploads/`).
    pub uploads: PathBuf,
    /// Mind-map response cache database (`data/cache.db`).
    pub cache_db: PathBuf,
    /// Document and user metadata database (`data/documents.db`).
    pub documents_db: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            uploads: root.join("uploads"),
            cache_db: root.join("cache.db"),
            documents_db: root.join("documents.db"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.uploads)?;
        Ok(())
    }
}

/// Top-level MindAtlas configuration.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Generative-provider API key. Absent means topic generation is
    /// unconfigured; requests surface a configuration error.
    pub gemini_api_key: Option<String>,
    /// Cache entry time-to-live in seconds.
    pub cache_ttl_secs: i64,
    /// Upload size bound in bytes.
    pub max_upload_bytes: usize,
    /// Outbound provider request timeout.
    pub provider_timeout: Duration,
}

impl AtlasConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5173);

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            gemini_api_key,
            cache_ttl_secs: CACHE_TTL_SECS,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            provider_timeout: PROVIDER_TIMEOUT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_paths_create_dirs() {
        let dir = std::env::temp_dir().join(format!("mindatlas-cfg-{}", std::process::id()));
        let paths = DataPaths::new(&dir).unwrap();
        assert!(paths.uploads.is_dir());
        assert_eq!(paths.cache_db, dir.join("cache.db"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
