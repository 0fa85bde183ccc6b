//! Prompt construction for the generateContent call.

use serde_json::{json, Value};

/// Structural requirements the provider must honor. Section naming adapts to
/// the topic; counts are enforced in the instructions.
const STRUCTURE_PROMPT: &str = "You output STRICT JSON for a mind map. Build a deeply structured, study-ready outline for the topic. \
REQUIREMENTS (enforce strictly):\n\
- Top-level: 6-8 sections tailored to the topic (no filler).\n\
- For EACH top-level section: include bulletPoints with 5-9 short, factual bullets.\n\
- For EACH top-level section: include 3-5 children subsections.\n\
- For EACH subsection child: include bulletPoints with 3-6 bullets (concise) and may include its own children if helpful.\n\
- Every node fields: title (string), learn_more (string URL or empty), bulletPoints (array<string>), children (array).\n\
- Prefer concrete, current terminology; avoid placeholders like '[current name]'.\n\
- If the topic is an institution (e.g., Indian Army), good top-level sections are: Overview; Organizational Structure; Major Operations & Wars; Modernization & Technology; Recruitment & Training; Contributions & Roles; Future Vision; Notable Units/Regiments.\n\
- If the topic is a concept, adapt the section names accordingly (Definition; Key Concepts; Mechanisms; Applications; History; Case Studies; Common Misconceptions; Further Reading).";

/// Build the generateContent request body for a topic.
pub(crate) fn request_body(topic: &str) -> Value {
    let text = format!(
        "Return ONLY valid JSON for a mind map with fields: \
         topic (string), root (object: title, learn_more, bulletPoints[array<string>], children[] of same shape).\n\
         {}\nUser topic: {}",
        STRUCTURE_PROMPT, topic
    );
    json!({
        "contents": [{
            "parts": [{ "text": text }]
        }]
    })
}
