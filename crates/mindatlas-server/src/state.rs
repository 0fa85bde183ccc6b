//! Shared application state.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;

use mindatlas_core::{AtlasConfig, Result};
use mindatlas_genai::MindMapGenerator;
use mindatlas_outline::Outliner;
use mindatlas_pdf::PdfExtractor;
use mindatlas_store::{CacheStore, DocumentStore, UserRecord, UserStore};

/// The authenticated identity behind a session token.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: i64,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

impl From<UserRecord> for SessionUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

/// Shared application state accessible from all route handlers. Every
/// component is constructed here, once, from the config object.
pub struct AppState {
    pub config: AtlasConfig,
    pub cache: CacheStore,
    pub documents: DocumentStore,
    pub users: UserStore,
    pub generator: MindMapGenerator,
    pub extractor: PdfExtractor,
    pub outliner: Outliner,
    sessions: RwLock<HashMap<String, SessionUser>>,
}

impl AppState {
    pub fn new(config: AtlasConfig) -> Result<Self> {
        let cache = CacheStore::open(&config.data_paths.cache_db, config.cache_ttl_secs)?;
        let documents = DocumentStore::open(
            &config.data_paths.documents_db,
            &config.data_paths.uploads,
            config.max_upload_bytes,
        )?;
        let users = UserStore::open(&config.data_paths.documents_db)?;
        let generator = MindMapGenerator::new(&config);

        Ok(Self {
            config,
            cache,
            documents,
            users,
            generator,
            extractor: PdfExtractor::new(),
            outliner: Outliner::new(),
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Issue a bearer token for a freshly authenticated user.
    pub fn create_session(&self, user: SessionUser) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.write().insert(token.clone(), user);
        token
    }

    /// Resolve a token to its session user.
    pub fn session_for(&self, token: &str) -> Option<SessionUser> {
        self.sessions.read().get(token).cloned()
    }

    /// Drop a session. Unknown tokens are a no-op — logout is idempotent.
    pub fn revoke_session(&self, token: &str) {
        self.sessions.write().remove(token);
    }
}
