//! Model availability and preference-ordered selection.

use serde::Deserialize;

/// Preference order. Higher-quality models first; a prefix match accepts
/// versioned identifiers.
pub const PREFERRED_MODELS: &[&str] = &[
    "gemini-2.5-pro",
    "gemini-1.5-pro-latest",
    "gemini-1.5-pro",
    "gemini-2.5-flash",
    "gemini-1.5-flash-latest",
    "gemini-1.5-flash",
];

/// `GET /models` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    #[serde(default)]
    pub name: String,
}

/// Normalize `models/{name}` to the bare short name.
pub(crate) fn short_name(name: &str) -> &str {
    name.strip_prefix("models/").unwrap_or(name)
}

/// Pick the best available model: the first preference with an exact or
/// prefix match, else the first available model, else none.
pub fn choose_from(available: &[String]) -> Option<String> {
    if available.is_empty() {
        return None;
    }
    for prefer in PREFERRED_MODELS {
        for candidate in available {
            if candidate == prefer || candidate.starts_with(prefer) {
                return Some(candidate.clone());
            }
        }
    }
    available.first().cloned()
}
