//! Review listing page parser

use scraper::{Html, Selector};

use super::config::ReviewSelectors;
use super::{compile_selector, element_text};
use crate::infrastructure::extraction_error::ExtractionResult;

/// Parser for one page of a review listing
pub struct ReviewPageParser {
    container_selector: Selector,
    text_selector: Selector,
}

impl ReviewPageParser {
    pub fn new() -> ExtractionResult<Self> {
        Self::with_config(&ReviewSelectors::default())
    }

    pub fn with_config(selectors: &ReviewSelectors) -> ExtractionResult<Self> {
        Ok(Self {
            container_selector: compile_selector(&selectors.review_container)?,
            text_selector: compile_selector(&selectors.review_text)?,
        })
    }

    /// Non-empty review texts in page order
    pub fn review_texts(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.container_selector)
            .filter_map(|review| review.select(&self.text_selector).next())
            .map(|text| element_text(&text))
            .filter(|text| !text.is_empty())
            .collect()
    }
}
