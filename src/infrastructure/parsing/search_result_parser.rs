//! Search result page parser

use scraper::{Html, Selector};
use tracing::debug;

use super::compile_selector;
use super::config::SearchSelectors;
use crate::infrastructure::extraction_error::ExtractionResult;

/// Finds the first search result carrying a product id
pub struct SearchResultParser {
    result_selector: Selector,
    id_attr: String,
}

impl SearchResultParser {
    pub fn new() -> ExtractionResult<Self> {
        Self::with_config(&SearchSelectors::default())
    }

    pub fn with_config(selectors: &SearchSelectors) -> ExtractionResult<Self> {
        Ok(Self {
            result_selector: compile_selector(&selectors.result_item)?,
            id_attr: selectors.product_id_attr.clone(),
        })
    }

    /// Product id of the first result whose id attribute is non-empty.
    ///
    /// Placeholder slots (ads, separators) carry an empty attribute and are skipped.
    pub fn first_product_id(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let found = document
            .select(&self.result_selector)
            .filter_map(|item| item.value().attr(&self.id_attr))
            .map(str::trim)
            .find(|id| !id.is_empty())
            .map(str::to_string);

        debug!("First search result id: {:?}", found);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_results_without_id() {
        let html = r#"
            <div class="s-main-slot">
              <div class="s-result-item" data-asin=""></div>
              <div class="s-result-item" data-asin="B0FIRST001"></div>
              <div class="s-result-item" data-asin="B0SECOND02"></div>
            </div>"#;
        let parser = SearchResultParser::new().unwrap();
        assert_eq!(parser.first_product_id(html).as_deref(), Some("B0FIRST001"));
    }

    #[test]
    fn test_no_results() {
        let parser = SearchResultParser::new().unwrap();
        assert_eq!(parser.first_product_id("<div class=\"s-no-results\"></div>"), None);
    }
}
