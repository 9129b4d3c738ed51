//! Product page parser
//!
//! Extracts the title, feature bullets and specification tables from a
//! product page.

use scraper::{Html, Selector};
use tracing::debug;

use super::config::ProductPageSelectors;
use super::{compile_selector, compile_selector_group, compile_selectors, element_text};
use crate::domain::product::{ProductFields, TITLE_SENTINEL, TechnicalDetails};
use crate::infrastructure::extraction_error::ExtractionResult;

/// Parser for product detail pages
pub struct ProductPageParser {
    title_selectors: Vec<Selector>,
    feature_selectors: Vec<Selector>,
    spec_table_selector: Option<Selector>,
    row_selector: Selector,
    label_selector: Selector,
    value_selector: Selector,
}

impl ProductPageParser {
    /// Create a parser with the default selectors
    pub fn new() -> ExtractionResult<Self> {
        Self::with_config(&ProductPageSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &ProductPageSelectors) -> ExtractionResult<Self> {
        Ok(Self {
            title_selectors: compile_selectors(&selectors.title)?,
            feature_selectors: compile_selectors(&selectors.feature_bullets)?,
            spec_table_selector: compile_selector_group(&selectors.spec_tables)?,
            row_selector: compile_selector(&selectors.spec_row)?,
            label_selector: compile_selector(&selectors.spec_label)?,
            value_selector: compile_selector(&selectors.spec_value)?,
        })
    }

    /// Parse a product page document
    pub fn parse(&self, html: &str) -> ProductFields {
        let document = Html::parse_document(html);

        let fields = ProductFields {
            title: self
                .extract_title(&document)
                .unwrap_or_else(|| TITLE_SENTINEL.to_string()),
            features: self.extract_features(&document),
            technical_details: self.extract_technical_details(&document),
        };

        debug!(
            "Parsed product page: {} features, {} technical details",
            fields.features.len(),
            fields.technical_details.len()
        );
        fields
    }

    /// First title-bearing node with non-empty text
    fn extract_title(&self, document: &Html) -> Option<String> {
        for selector in &self.title_selectors {
            if let Some(element) = document.select(selector).next() {
                let text = element_text(&element);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Feature bullets from the first selector that matches anything
    fn extract_features(&self, document: &Html) -> Vec<String> {
        for selector in &self.feature_selectors {
            let mut matched = false;
            let features: Vec<String> = document
                .select(selector)
                .inspect(|_| matched = true)
                .map(|element| element_text(&element))
                .filter(|text| !text.is_empty())
                .collect();

            if matched {
                return features;
            }
        }
        Vec::new()
    }

    /// Label/value rows from every specification table, last duplicate wins
    fn extract_technical_details(&self, document: &Html) -> TechnicalDetails {
        let mut details = TechnicalDetails::new();
        let Some(table_selector) = &self.spec_table_selector else {
            return details;
        };

        for table in document.select(table_selector) {
            for row in table.select(&self.row_selector) {
                let label = row.select(&self.label_selector).next();
                let value = row.select(&self.value_selector).next();

                if let (Some(label), Some(value)) = (label, value) {
                    let name = element_text(&label);
                    if let Some(previous) = details.insert(name.clone(), element_text(&value)) {
                        debug!("Technical detail '{}' overrides earlier value '{}'", name, previous);
                    }
                }
            }
        }

        details
    }
}
