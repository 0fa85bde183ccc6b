//! Heuristic document outlining — turns raw extracted text into a mind-map
//! tree without any model or network dependency.
//!
//! Keyword heuristics over tokenized sentences do the work a tagger/LLM
//! would otherwise do: short noun-initial sentences are treated as headings,
//! frequent content words stand in when a document has no headings, and a
//! blank-line paragraph splitter covers everything else. Strategies are an
//! explicit ordered list; analysis failures fall through to the next one.

pub mod lexicon;
pub mod text;

mod outliner;

pub use outliner::{HeadingHeuristic, OutlineStrategy, Outliner, ParagraphSections, MIN_TEXT_LEN};
