//! Outline strategies and the ordered-list selector.

use std::collections::HashMap;

use tracing::warn;

use mindatlas_core::{MindMapNode, MindMapResponse, Result};

use crate::lexicon::{is_noun_like, is_stop_word};
use crate::text::{split_sentences, tokenize, truncate_chars};

/// Extracted text shorter than this carries no meaningful structure; callers
/// reject it before outlining.
pub const MIN_TEXT_LEN: usize = 100;

/// Only the head of the document is analyzed.
const ANALYSIS_WINDOW_CHARS: usize = 10_000;
/// Window for the token-frequency subtopic fallback.
const FREQUENCY_WINDOW_CHARS: usize = 5_000;

const MAX_HEADING_WORDS: usize = 8;
const MAX_HEADING_CHARS: usize = 100;
const MAX_SUBTOPICS: usize = 6;
const SUPER_TOPIC_SENTENCES: usize = 50;
const MAX_SUPER_TOPICS: usize = 3;
const BULLET_SENTENCES: usize = 30;
const MAX_BULLETS: usize = 5;
const MAX_BULLET_CHARS: usize = 150;
const MAX_PARAGRAPHS: usize = 20;
const MAX_SECTIONS: usize = 6;

/// A named way of turning raw text into a mind map. Strategies are probed in
/// a fixed order; the first one producing a well-formed response wins.
pub trait OutlineStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn outline(&self, text: &str) -> Result<MindMapResponse>;
}

/// Ordered strategy list. The paragraph splitter terminates the list and
/// cannot fail, so `outline` always returns something usable.
pub struct Outliner {
    strategies: Vec<Box<dyn OutlineStrategy>>,
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

impl Outliner {
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(HeadingHeuristic), Box::new(ParagraphSections)],
        }
    }

    /// Outline `text` with the first strategy that succeeds.
    pub fn outline(&self, text: &str) -> MindMapResponse {
        for strategy in &self.strategies {
            match strategy.outline(text) {
                Ok(map) if map.is_well_formed() => return map,
                Ok(_) => warn!(strategy = strategy.name(), "strategy produced malformed map"),
                Err(e) => warn!(strategy = strategy.name(), "strategy failed: {}", e),
            }
        }
        // The paragraph splitter never gets here; kept so the signature can
        // stay infallible.
        MindMapResponse {
            topic: "Document".into(),
            root: MindMapNode::titled("Document"),
        }
    }
}

/// Primary path: short noun-initial sentences are headings; headings become
/// subtopics, each annotated with related super-topics and bullet sentences.
pub struct HeadingHeuristic;

impl HeadingHeuristic {
    fn is_heading(sentence: &str) -> bool {
        if sentence.chars().count() >= MAX_HEADING_CHARS {
            return false;
        }
        let words = tokenize(sentence);
        !words.is_empty() && words.len() <= MAX_HEADING_WORDS && is_noun_like(words[0])
    }

    /// Most frequent content tokens from the head of the document, used as
    /// subtopics when a document yields fewer than two headings. Ties break
    /// alphabetically to keep the outline deterministic.
    fn frequent_tokens(text: &str) -> Vec<String> {
        let window = truncate_chars(text, FREQUENCY_WINDOW_CHARS).to_lowercase();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokenize(&window) {
            if !is_stop_word(token) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
        let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        sorted
            .into_iter()
            .take(MAX_SUBTOPICS)
            .map(|(token, _)| token.to_string())
            .collect()
    }

    fn subtopic_node(subtopic: &str, sentences: &[&str]) -> MindMapNode {
        let needle = subtopic.to_lowercase();

        let mut super_topics = Vec::new();
        for sentence in sentences.iter().take(SUPER_TOPIC_SENTENCES) {
            if !sentence.to_lowercase().contains(&needle) {
                continue;
            }
            let descriptive: Vec<&str> = tokenize(sentence)
                .into_iter()
                .filter(|w| w.chars().count() > 3 && !is_stop_word(w))
                .collect();
            if !descriptive.is_empty() {
                let title = descriptive
                    .iter()
                    .take(4)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ");
                super_topics.push(MindMapNode::titled(title));
                if super_topics.len() >= MAX_SUPER_TOPICS {
                    break;
                }
            }
        }

        let mut bullet_points = Vec::new();
        for sentence in sentences.iter().take(BULLET_SENTENCES) {
            if sentence.to_lowercase().contains(&needle)
                && sentence.chars().count() < 200
            {
                bullet_points.push(truncate_chars(sentence.trim(), MAX_BULLET_CHARS).to_string());
                if bullet_points.len() >= MAX_BULLETS {
                    break;
                }
            }
        }

        MindMapNode {
            title: subtopic.to_string(),
            children: super_topics,
            bullet_points,
            ..Default::default()
        }
    }
}

impl OutlineStrategy for HeadingHeuristic {
    fn name(&self) -> &'static str {
        "heading-heuristic"
    }

    fn outline(&self, text: &str) -> Result<MindMapResponse> {
        let window = truncate_chars(text, ANALYSIS_WINDOW_CHARS);
        let sentences = split_sentences(window);

        let headings: Vec<&str> = sentences
            .iter()
            .copied()
            .filter(|s| Self::is_heading(s))
            .collect();

        let main_topic = headings.first().copied().unwrap_or("Document Topics");

        let subtopics: Vec<String> = if headings.len() >= 2 {
            headings
                .iter()
                .skip(1)
                .take(MAX_SUBTOPICS)
                .map(|s| s.to_string())
                .collect()
        } else {
            Self::frequent_tokens(text)
        };

        let children = subtopics
            .iter()
            .map(|subtopic| Self::subtopic_node(subtopic, &sentences))
            .collect();

        Ok(MindMapResponse {
            topic: main_topic.to_string(),
            root: MindMapNode {
                title: main_topic.to_string(),
                children,
                ..Default::default()
            },
        })
    }
}

/// Degraded path: blank-line paragraphs become numbered sections with their
/// sentences as bullets.
pub struct ParagraphSections;

impl OutlineStrategy for ParagraphSections {
    fn name(&self) -> &'static str {
        "paragraph-sections"
    }

    fn outline(&self, text: &str) -> Result<MindMapResponse> {
        let paragraphs: Vec<&str> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .take(MAX_PARAGRAPHS)
            .collect();

        let main_topic = paragraphs
            .first()
            .map(|p| truncate_chars(p, 100))
            .unwrap_or("Document");

        let children = paragraphs
            .iter()
            .skip(1)
            .take(MAX_SECTIONS)
            .enumerate()
            .map(|(i, para)| {
                let bullet_points: Vec<String> = para
                    .split('.')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .take(MAX_BULLETS)
                    .map(|s| truncate_chars(s, 100).to_string())
                    .collect();
                MindMapNode {
                    title: format!("Section {}", i + 1),
                    bullet_points,
                    ..Default::default()
                }
            })
            .collect();

        Ok(MindMapResponse {
            topic: main_topic.to_string(),
            root: MindMapNode {
                title: main_topic.to_string(),
                children,
                ..Default::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "Photosynthesis\n\
        Photosynthesis is the process by which green plants convert light into chemical energy.\n\
        Light Reactions\n\
        The light reactions capture photons and produce ATP inside the thylakoid membranes.\n\
        Calvin Cycle\n\
        The Calvin cycle uses ATP to fix carbon dioxide into sugars over many steps.\n";

    #[test]
    fn headings_become_topic_and_subtopics() {
        let map = HeadingHeuristic.outline(ARTICLE).unwrap();
        assert_eq!(map.topic, "Photosynthesis");
        let titles: Vec<&str> = map.root.children.iter().map(|c| c.title.as_str()).collect();
        assert!(titles.contains(&"Light Reactions"));
        assert!(titles.contains(&"Calvin Cycle"));
    }

    #[test]
    fn subtopics_collect_mention_bullets() {
        let map = HeadingHeuristic.outline(ARTICLE).unwrap();
        let calvin = map
            .root
            .children
            .iter()
            .find(|c| c.title == "Calvin Cycle")
            .unwrap();
        assert!(!calvin.bullet_points.is_empty());
        assert!(calvin.bullet_points.len() <= MAX_BULLETS);
        assert!(calvin
            .bullet_points
            .iter()
            .all(|b| b.chars().count() <= MAX_BULLET_CHARS));
        assert!(calvin.children.len() <= MAX_SUPER_TOPICS);
    }

    #[test]
    fn no_headings_falls_back_to_frequent_tokens() {
        let prose = "the turbine spins because moving water pushes against the turbine blades constantly. \
                     water pressure drives the turbine through the penstock every single day. \
                     engineers monitor the turbine and the water flow with careful instruments always.";
        let map = HeadingHeuristic.outline(prose).unwrap();
        assert_eq!(map.topic, "Document Topics");
        let titles: Vec<&str> = map.root.children.iter().map(|c| c.title.as_str()).collect();
        assert!(titles.contains(&"turbine"));
        assert!(titles.contains(&"water"));
        assert!(titles.len() <= MAX_SUBTOPICS);
    }

    #[test]
    fn heading_requires_noun_start_and_short_length() {
        assert!(HeadingHeuristic::is_heading("Solar Energy"));
        assert!(HeadingHeuristic::is_heading("Results"));
        assert!(!HeadingHeuristic::is_heading("The experiment went well"));
        assert!(!HeadingHeuristic::is_heading("Consider the following example"));
        assert!(!HeadingHeuristic::is_heading(
            "Energy systems of the modern age have nine separate words here"
        ));
    }

    #[test]
    fn deterministic_for_identical_input() {
        let a = Outliner::new().outline(ARTICLE);
        let b = Outliner::new().outline(ARTICLE);
        assert_eq!(a, b);
    }

    #[test]
    fn paragraph_fallback_single_paragraph_has_no_children() {
        let map = ParagraphSections.outline("Just one paragraph of text.").unwrap();
        assert_eq!(map.topic, "Just one paragraph of text.");
        assert!(map.root.children.is_empty());
    }

    #[test]
    fn paragraph_fallback_numbers_sections() {
        let text = "Title paragraph here.\n\nFirst body. More detail. Even more.\n\nSecond body.";
        let map = ParagraphSections.outline(text).unwrap();
        assert_eq!(map.root.children.len(), 2);
        assert_eq!(map.root.children[0].title, "Section 1");
        assert_eq!(map.root.children[1].title, "Section 2");
        assert_eq!(
            map.root.children[0].bullet_points,
            vec!["First body", "More detail", "Even more"]
        );
        assert!(map.root.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn paragraph_fallback_empty_text_is_document() {
        let map = ParagraphSections.outline("").unwrap();
        assert_eq!(map.topic, "Document");
        assert!(map.root.children.is_empty());
    }

    #[test]
    fn outliner_never_panics_on_odd_input() {
        let outliner = Outliner::new();
        for text in ["", "....", "\n\n\n", "héllo wörld ünïcode", "a b. c d."] {
            let map = outliner.outline(text);
            assert!(map.is_well_formed());
        }
    }

    #[test]
    fn long_input_is_windowed() {
        // One heading, then enough filler to blow past the analysis window;
        // a late "heading" beyond 10k chars must not appear.
        let mut text = String::from("Geology\n");
        while text.len() < ANALYSIS_WINDOW_CHARS + 1_000 {
            text.push_str("the rocks under the surface were formed over very long spans of time. ");
        }
        text.push_str("\nHidden Section\n");
        let map = HeadingHeuristic.outline(&text).unwrap();
        assert_eq!(map.topic, "Geology");
        assert!(map
            .root
            .children
            .iter()
            .all(|c| c.title != "Hidden Section"));
    }
}
