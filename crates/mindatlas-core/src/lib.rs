//! MindAtlas Core — configuration, error taxonomy, mind-map data model.

pub mod config;
pub mod error;
pub mod model;

pub use config::{AtlasConfig, DataPaths};
pub use error::{Error, Result};
pub use model::{MindMapNode, MindMapResponse};

/// Current unix time in whole seconds.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
