//! Deterministic fallback mind map, built purely from the topic string.
//!
//! Served whenever the provider path cannot yield a well-formed response, so
//! the UI always has something to render.

use mindatlas_core::{MindMapNode, MindMapResponse};

const FALLBACK_SECTIONS: &[&str] = &["Overview", "Key Concepts", "Further Reading"];

/// Reference URL derived from the topic (spaces become underscores).
fn reference_url(topic: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", topic.replace(' ', "_"))
}

/// Build the fallback response for a topic. Identical output for identical
/// input; no network involved.
pub fn build_fallback(topic: &str) -> MindMapResponse {
    let learn_more = reference_url(topic);
    let children = FALLBACK_SECTIONS
        .iter()
        .map(|section| MindMapNode {
            title: section.to_string(),
            learn_more: learn_more.clone(),
            ..Default::default()
        })
        .collect();

    MindMapResponse {
        topic: topic.to_string(),
        root: MindMapNode {
            title: topic.to_string(),
            learn_more,
            children,
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let a = build_fallback("Quantum Computing");
        let b = build_fallback("Quantum Computing");
        assert_eq!(a, b);
    }

    #[test]
    fn shape_and_reference_url() {
        let fallback = build_fallback("Quantum Computing");
        assert!(fallback.is_well_formed());
        assert_eq!(fallback.topic, "Quantum Computing");
        assert_eq!(
            fallback.root.learn_more,
            "https://en.wikipedia.org/wiki/Quantum_Computing"
        );

        let titles: Vec<&str> = fallback
            .root
            .children
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, ["Overview", "Key Concepts", "Further Reading"]);
        assert!(fallback
            .root
            .children
            .iter()
            .all(|c| c.learn_more == fallback.root.learn_more && c.children.is_empty()));
    }
}
