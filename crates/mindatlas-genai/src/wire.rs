//! Provider response shapes.
//!
//! The provider answers in one of two shapes: the mind-map object directly,
//! or a candidate/content/part envelope whose part texts embed the JSON as a
//! string. Parsers are tried in that fixed order; the first shape yielding a
//! well-formed response wins.

use serde::Deserialize;
use serde_json::Value;

use mindatlas_core::MindMapResponse;

/// generateContent envelope: `candidates[].content.parts[].text`.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentEnvelope {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Extract a well-formed mind map from a provider response body, or `None`
/// when no shape matches.
pub fn parse_mind_map(body: &Value) -> Option<MindMapResponse> {
    // Shape 1: the response body is the mind map itself.
    if let Ok(direct) = serde_json::from_value::<MindMapResponse>(body.clone()) {
        if direct.is_well_formed() {
            return Some(direct);
        }
    }

    // Shape 2: candidate envelope with JSON embedded in part texts. Each
    // text is attempted in turn until one validates.
    let envelope: GenerateContentEnvelope = serde_json::from_value(body.clone()).ok()?;
    for candidate in envelope.candidates {
        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        for part in parts {
            let text = match part.text {
                Some(t) => t,
                None => continue,
            };
            if let Ok(parsed) = serde_json::from_str::<MindMapResponse>(&text) {
                if parsed.is_well_formed() {
                    return Some(parsed);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> Value {
        json!({
            "topic": "Solar Energy",
            "root": {
                "title": "Solar Energy",
                "learn_more": "",
                "bulletPoints": ["Converts sunlight to electricity"],
                "children": [{"title": "Photovoltaics"}]
            }
        })
    }

    #[test]
    fn parses_direct_object() {
        let parsed = parse_mind_map(&sample_json()).unwrap();
        assert_eq!(parsed.topic, "Solar Energy");
        assert_eq!(parsed.root.children[0].title, "Photovoltaics");
    }

    #[test]
    fn parses_candidate_envelope() {
        let embedded = serde_json::to_string(&sample_json()).unwrap();
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": embedded }] }
            }]
        });
        let parsed = parse_mind_map(&body).unwrap();
        assert_eq!(parsed.topic, "Solar Energy");
    }

    #[test]
    fn skips_non_json_parts_until_one_validates() {
        let embedded = serde_json::to_string(&sample_json()).unwrap();
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your mind map:" },
                    { "text": embedded }
                ]}
            }]
        });
        assert!(parse_mind_map(&body).is_some());
    }

    #[test]
    fn rejects_envelope_without_valid_payload() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"topic\": \"x\"}" }] }
            }]
        });
        assert!(parse_mind_map(&body).is_none());
    }

    #[test]
    fn rejects_unrelated_body() {
        assert!(parse_mind_map(&json!({"error": {"code": 404}})).is_none());
    }
}
