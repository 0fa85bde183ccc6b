//! Concrete extraction strategies.

use std::path::Path;

/// One way of pulling text out of a PDF.
pub trait ExtractStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, path: &Path) -> Result<String, Box<dyn std::error::Error>>;
}

/// Layout-aware extraction via `pdf-extract`. Handles multi-column and
/// positioned text better than a raw content-stream walk.
pub struct LayoutText;

impl ExtractStrategy for LayoutText {
    fn name(&self) -> &'static str {
        "layout-text"
    }

    fn extract(&self, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
        Ok(pdf_extract::extract_text(path)?)
    }
}

/// Page-by-page extraction via `lopdf`, joined with newlines.
pub struct PageText;

impl ExtractStrategy for PageText {
    fn name(&self) -> &'static str {
        "page-text"
    }

    fn extract(&self, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
        let doc = lopdf::Document::load(path)?;
        let mut text = String::new();
        for (page_number, _) in doc.get_pages() {
            match doc.extract_text(&[page_number]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => {
                    tracing::warn!(page = page_number, "page text extraction failed: {}", e);
                }
            }
        }
        Ok(text)
    }
}
