//! Stop words and a small part-of-speech lexicon.
//!
//! Heading detection needs to know whether a sentence opens with a noun.
//! Closed-class words and common verbs/adverbs are excluded by lexicon;
//! everything else defaults to noun, which is also what a statistical
//! tagger does with unknown words.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Standard English stop-word list (tokenized form — contractions arrive as
/// their alphanumeric pieces).
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
        "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
        "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
        "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
        "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
        "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
    ]
    .into_iter()
    .collect()
});

/// Common verbs that open instructional sentences; a sentence starting with
/// one of these is not a heading.
static COMMON_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "add", "avoid", "check", "choose", "click", "close", "compare", "consider", "define",
        "describe", "discuss", "ensure", "explain", "find", "follow", "get", "give", "go",
        "identify", "include", "install", "keep", "learn", "let", "list", "make", "note", "open",
        "provide", "read", "remove", "review", "run", "see", "select", "start", "stop",
        "summarize", "take", "try", "understand", "use", "write",
    ]
    .into_iter()
    .collect()
});

/// Sentence adverbs and connectives that can open a sentence but never a
/// heading. Listed explicitly — a `-ly` suffix rule would swallow nouns like
/// "family" or "assembly".
static SENTENCE_ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "additionally", "also", "always", "finally", "furthermore", "generally", "however",
        "moreover", "never", "often", "quickly", "really", "similarly", "simply", "sometimes",
        "therefore", "typically", "usually",
    ]
    .into_iter()
    .collect()
});

/// Case-folded stop-word membership.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().as_str())
}

/// Whether a token reads as a noun (common or proper, singular or plural).
/// Closed-class words, common verbs, and sentence adverbs are ruled out by
/// lexicon, bare numbers by shape; unknown words default to noun.
pub fn is_noun_like(token: &str) -> bool {
    if token.is_empty() || token.chars().all(|c| c.is_numeric()) {
        return false;
    }
    let lower = token.to_lowercase();
    !STOP_WORDS.contains(lower.as_str())
        && !COMMON_VERBS.contains(lower.as_str())
        && !SENTENCE_ADVERBS.contains(lower.as_str())
}
