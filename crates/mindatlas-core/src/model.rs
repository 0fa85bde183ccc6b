//! Mind-map tree model shared by the generative client, the outliner, the
//! cache, and the HTTP surface.

use serde::{Deserialize, Serialize};

/// One node of a mind map. Owns its children; the tree has no cycles and no
/// shared ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    #[serde(default)]
    pub title: String,
    /// Reserved illustration slot, always empty today.
    #[serde(default)]
    pub image: String,
    /// Reference URL or empty string.
    #[serde(default)]
    pub learn_more: String,
    #[serde(default, rename = "bulletPoints")]
    pub bullet_points: Vec<String>,
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    /// Leaf node with a title and nothing else.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A complete mind map for a topic. Created per request, cached by
/// `(topic, model)`, never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapResponse {
    pub topic: String,
    pub root: MindMapNode,
}

impl MindMapResponse {
    /// A response is usable only when both the topic and the root title are
    /// present. Partial responses must never be cached or returned as
    /// success.
    pub fn is_well_formed(&self) -> bool {
        !self.topic.trim().is_empty() && !self.root.title.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_fields_default_when_absent() {
        let node: MindMapNode =
            serde_json::from_str(r#"{"title": "Overview"}"#).unwrap();
        assert_eq!(node.title, "Overview");
        assert!(node.learn_more.is_empty());
        assert!(node.bullet_points.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn bullet_points_round_trip_as_camel_case() {
        let node = MindMapNode {
            title: "Key Concepts".into(),
            bullet_points: vec!["first".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("bulletPoints").is_some());
        let back: MindMapNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn well_formed_requires_topic_and_root_title() {
        let ok = MindMapResponse {
            topic: "Solar Energy".into(),
            root: MindMapNode::titled("Solar Energy"),
        };
        assert!(ok.is_well_formed());

        let no_title = MindMapResponse {
            topic: "Solar Energy".into(),
            root: MindMapNode::default(),
        };
        assert!(!no_title.is_well_formed());

        let no_topic = MindMapResponse {
            topic: "   ".into(),
            root: MindMapNode::titled("x"),
        };
        assert!(!no_topic.is_well_formed());
    }

    #[test]
    fn missing_root_fails_to_parse() {
        let r: std::result::Result<MindMapResponse, _> =
            serde_json::from_str(r#"{"topic": "Energy"}"#);
        assert!(r.is_err());
    }
}
