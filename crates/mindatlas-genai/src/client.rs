//! Mind-map generation against the Generative Language HTTP API.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use mindatlas_core::{AtlasConfig, Error, MindMapResponse, Result};
use mindatlas_store::CacheStore;

use crate::fallback::build_fallback;
use crate::{models, prompt, retry, wire};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model listing is a small request; it gets a shorter deadline than
/// generation.
const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for topic → mind map generation.
///
/// `generate` fails only for a missing credential or an empty model list.
/// Transport failures, provider rejections, and malformed payloads all
/// resolve to the deterministic fallback so the caller always has a
/// well-formed response to serve.
pub struct MindMapGenerator {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl MindMapGenerator {
    pub fn new(config: &AtlasConfig) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Construct against a non-default provider endpoint (tests point this
    /// at a local mock provider).
    pub fn with_base_url(config: &AtlasConfig, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: config.gemini_api_key.clone(),
            timeout: config.provider_timeout,
        }
    }

    /// Generate a mind map for `topic`, consulting the cache unless
    /// `bypass_cache` is set and writing fresh results through best-effort.
    pub async fn generate(
        &self,
        topic: &str,
        cache: &CacheStore,
        bypass_cache: bool,
    ) -> Result<MindMapResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not set".into()))?;

        let available = self.list_models(api_key).await;
        let model = models::choose_from(&available).ok_or_else(|| {
            Error::UpstreamUnavailable(
                "Unable to list available models with provided API key. \
                 Ensure your key is a valid Gemini API key and has access to models."
                    .into(),
            )
        })?;

        if !bypass_cache {
            match cache.get(topic, &model) {
                Ok(Some(hit)) => {
                    debug!(topic, model = %model, "cache hit");
                    return Ok(hit);
                }
                Ok(None) => {}
                // A failing cache read is a miss, not a failed request.
                Err(e) => warn!(topic, "cache read failed: {}", e),
            }
        }

        let body = prompt::request_body(topic);
        match self.post_generate(api_key, &model, &body).await {
            Ok(payload) => {
                if let Some(parsed) = wire::parse_mind_map(&payload) {
                    cache.put_best_effort(topic, &model, &parsed);
                    Ok(parsed)
                } else {
                    warn!(topic, model = %model, "no mind map in provider payload, serving fallback");
                    let fallback = build_fallback(topic);
                    cache.put_best_effort(topic, &model, &fallback);
                    Ok(fallback)
                }
            }
            Err(e) => {
                warn!(topic, model = %model, "generation failed ({}), serving fallback", e);
                Ok(build_fallback(topic))
            }
        }
    }

    /// Short model names the credential can access. Network and parse
    /// failures degrade to an empty list.
    async fn list_models(&self, api_key: &str) -> Vec<String> {
        let url = format!("{}/models", self.base_url);
        let response = match self
            .http
            .get(&url)
            .query(&[("key", api_key)])
            .timeout(LIST_MODELS_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("model listing failed: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "model listing rejected");
            return Vec::new();
        }

        match response.json::<models::ModelsResponse>().await {
            Ok(parsed) => parsed
                .models
                .into_iter()
                .filter(|m| !m.name.is_empty())
                .map(|m| models::short_name(&m.name).to_string())
                .collect(),
            Err(e) => {
                warn!("model listing parse failed: {}", e);
                Vec::new()
            }
        }
    }

    /// POST generateContent with retry on transport failures only. HTTP
    /// error statuses are returned as `UpstreamRejected` without retrying.
    async fn post_generate(&self, api_key: &str, model: &str, body: &Value) -> Result<Value> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = retry::with_backoff(
            retry::MAX_ATTEMPTS,
            retry::INITIAL_BACKOFF,
            |e: &reqwest::Error| e.is_timeout() || e.is_connect(),
            || {
                self.http
                    .post(&url)
                    .query(&[("key", api_key)])
                    .header("x-goog-api-key", api_key)
                    .json(body)
                    .timeout(self.timeout)
                    .send()
            },
        )
        .await
        .map_err(|e| Error::Network(format!("after retries: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Network(format!("invalid JSON body: {}", e)))
    }
}
