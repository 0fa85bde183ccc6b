//! MindAtlas generative client — model selection, mind-map generation via
//! the Google Generative Language HTTP API, and the deterministic fallback.
//!
//! The generation path never surfaces provider failures to its caller beyond
//! two explicit cases (missing credential, no available model); everything
//! else degrades to the fallback mind map.

mod client;
mod fallback;
mod models;
mod prompt;
mod retry;
mod wire;

pub use client::{MindMapGenerator, DEFAULT_BASE_URL};
pub use fallback::build_fallback;
pub use models::{choose_from, PREFERRED_MODELS};
pub use wire::parse_mind_map;
