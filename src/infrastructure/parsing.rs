//! HTML and JSON parsing infrastructure
//!
//! Each parser compiles its selectors once at construction; an invalid
//! selector is reported as `ExtractionError::InvalidSelector` instead of
//! being silently skipped.

pub mod api_payload_parser;
pub mod config;
pub mod field_extractor;
pub mod product_page_parser;
pub mod review_page_parser;
pub mod search_result_parser;

// Re-export public types
pub use api_payload_parser::ApiPayloadParser;
pub use config::ParsingConfig;
pub use field_extractor::FieldExtractor;
pub use product_page_parser::ProductPageParser;
pub use review_page_parser::ReviewPageParser;
pub use search_result_parser::SearchResultParser;

use scraper::{ElementRef, Selector};

use crate::infrastructure::extraction_error::{ExtractionError, ExtractionResult};

/// Compile one selector string
pub(crate) fn compile_selector(selector: &str) -> ExtractionResult<Selector> {
    Selector::parse(selector).map_err(|e| ExtractionError::invalid_selector(selector, e))
}

/// Compile a fallback list, keeping order
pub(crate) fn compile_selectors(selectors: &[String]) -> ExtractionResult<Vec<Selector>> {
    selectors.iter().map(|s| compile_selector(s)).collect()
}

/// Compile a list into one selector group so matches come back in document order
pub(crate) fn compile_selector_group(selectors: &[String]) -> ExtractionResult<Option<Selector>> {
    if selectors.is_empty() {
        return Ok(None);
    }
    compile_selector(&selectors.join(", ")).map(Some)
}

/// Collapse runs of whitespace and drop bidi marks, then trim
pub fn normalize_text(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || matches!(c, '\u{200e}' | '\u{200f}'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized text content of an element
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}
