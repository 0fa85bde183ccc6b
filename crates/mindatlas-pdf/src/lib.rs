//! PDF text extraction behind an ordered list of named strategies.
//!
//! The layout-aware extractor goes first (better on multi-column and
//! complex PDFs); the page-by-page extractor covers files the first one
//! chokes on. The first strategy yielding non-empty trimmed text wins; when
//! every strategy fails the error names each one attempted.

mod strategy;

pub use strategy::{ExtractStrategy, LayoutText, PageText};

use std::path::Path;

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Every strategy failed or produced empty text.
    #[error("could not extract text from PDF (tried: {})", attempted.join(", "))]
    NoText { attempted: Vec<&'static str> },
}

/// Extractor holding the ordered strategy list, built once at startup.
pub struct PdfExtractor {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::with_strategies(vec![Box::new(LayoutText), Box::new(PageText)])
    }

    /// Build with an explicit strategy list (tests inject stubs here).
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extract text from the PDF at `path` using the first strategy that
    /// yields non-empty trimmed text.
    pub fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let mut attempted = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            attempted.push(strategy.name());
            match strategy.extract(path) {
                Ok(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        return Ok(trimmed.to_string());
                    }
                    warn!(
                        strategy = strategy.name(),
                        path = %path.display(),
                        "extraction yielded empty text"
                    );
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        path = %path.display(),
                        "extraction failed: {}", e
                    );
                }
            }
        }
        Err(ExtractError::NoText { attempted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct Fixed(&'static str);
    impl ExtractStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn extract(&self, _path: &Path) -> Result<String, Box<dyn std::error::Error>> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;
    impl ExtractStrategy for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn extract(&self, _path: &Path) -> Result<String, Box<dyn std::error::Error>> {
            Err("broken backend".into())
        }
    }

    #[test]
    fn first_non_empty_strategy_wins() {
        let extractor = PdfExtractor::with_strategies(vec![
            Box::new(Fixed("   ")),
            Box::new(Fixed("actual text")),
            Box::new(Fixed("never reached")),
        ]);
        let text = extractor.extract(Path::new("ignored.pdf")).unwrap();
        assert_eq!(text, "actual text");
    }

    #[test]
    fn failing_strategy_falls_through() {
        let extractor =
            PdfExtractor::with_strategies(vec![Box::new(Failing), Box::new(Fixed("recovered"))]);
        let text = extractor.extract(Path::new("ignored.pdf")).unwrap();
        assert_eq!(text, "recovered");
    }

    #[test]
    fn exhausted_strategies_name_every_attempt() {
        let extractor =
            PdfExtractor::with_strategies(vec![Box::new(Failing), Box::new(Fixed(""))]);
        let err = extractor.extract(Path::new("ignored.pdf")).unwrap_err();
        let ExtractError::NoText { attempted } = err;
        assert_eq!(attempted, vec!["failing", "fixed"]);
    }

    #[test]
    fn garbage_file_errors_with_both_real_strategies() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf at all").unwrap();

        let err = PdfExtractor::new().extract(file.path()).unwrap_err();
        let ExtractError::NoText { attempted } = err;
        assert_eq!(attempted, vec!["layout-text", "page-text"]);
    }
}
