//! Backend-agnostic field extraction
//!
//! Maps raw content, HTML or JSON, to normalized product fields and review
//! texts. The content tag decides which parser runs; callers never branch on
//! the backend themselves.

use super::api_payload_parser::ApiPayloadParser;
use super::config::ParsingConfig;
use super::product_page_parser::ProductPageParser;
use super::review_page_parser::ReviewPageParser;
use crate::domain::product::ProductFields;
use crate::domain::raw_content::RawContent;
use crate::infrastructure::extraction_error::ExtractionResult;

pub struct FieldExtractor {
    product_page: ProductPageParser,
    review_page: ReviewPageParser,
    api_payload: ApiPayloadParser,
}

impl FieldExtractor {
    /// Extractor with default selectors and pointers
    pub fn new() -> ExtractionResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    pub fn with_config(config: &ParsingConfig) -> ExtractionResult<Self> {
        Ok(Self {
            product_page: ProductPageParser::with_config(&config.product_page_selectors)?,
            review_page: ReviewPageParser::with_config(&config.review_selectors)?,
            api_payload: ApiPayloadParser::with_config(&config.api_pointers),
        })
    }

    /// Title, features and technical details
    pub fn extract_fields(&self, content: &RawContent) -> ProductFields {
        match content {
            RawContent::Html { body, .. } => self.product_page.parse(body),
            RawContent::Json { body, .. } => self.api_payload.parse_product(body),
        }
    }

    /// Review texts of one page, possibly empty
    pub fn extract_review_texts(&self, content: &RawContent) -> Vec<String> {
        match content {
            RawContent::Html { body, .. } => self.review_page.review_texts(body),
            RawContent::Json { body, .. } => self.api_payload.review_texts(body),
        }
    }
}
