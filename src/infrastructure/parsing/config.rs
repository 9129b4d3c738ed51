//! Parsing configuration for HTML and JSON extraction
//!
//! Centralized configuration for CSS selectors and JSON pointers.
//! Where a field lists several selectors they are tried in order and the
//! first one that matches wins.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Product page selectors
    pub product_page_selectors: ProductPageSelectors,

    /// Review listing selectors
    pub review_selectors: ReviewSelectors,

    /// Search result selectors
    pub search_selectors: SearchSelectors,

    /// JSON pointers into structured API payloads
    pub api_pointers: ApiPointers,
}

/// CSS selectors for product pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPageSelectors {
    /// Title-bearing nodes, tried in order
    pub title: Vec<String>,

    /// Feature bullet nodes, tried in order
    pub feature_bullets: Vec<String>,

    /// Specification tables; all of them are visited in document order
    pub spec_tables: Vec<String>,

    /// Rows within a specification table
    pub spec_row: String,

    /// Label cell within a row
    pub spec_label: String,

    /// Value cell within a row
    pub spec_value: String,
}

impl Default for ProductPageSelectors {
    fn default() -> Self {
        Self {
            title: vec!["#productTitle".to_string()],
            feature_bullets: vec!["#feature-bullets li".to_string()],
            spec_tables: vec![
                "table#productDetails_techSpec_section_1".to_string(),
                "table#productDetails_detailBullets_sections1".to_string(),
            ],
            spec_row: "tr".to_string(),
            spec_label: "th".to_string(),
            spec_value: "td".to_string(),
        }
    }
}

/// CSS selectors for review listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSelectors {
    /// One element per review; an empty match set ends pagination
    pub review_container: String,

    /// Review body inside a container
    pub review_text: String,
}

impl Default for ReviewSelectors {
    fn default() -> Self {
        Self {
            review_container: ".review".to_string(),
            review_text: ".review-text-content span".to_string(),
        }
    }
}

/// CSS selectors for search result pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSelectors {
    /// Result items carrying a product id attribute
    pub result_item: String,

    /// Attribute holding the product id
    pub product_id_attr: String,
}

impl Default for SearchSelectors {
    fn default() -> Self {
        Self {
            result_item: "div.s-result-item[data-asin]".to_string(),
            product_id_attr: "data-asin".to_string(),
        }
    }
}

/// JSON pointers (RFC 6901) into structured API payloads, tried in order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiPointers {
    pub title: Vec<String>,
    pub features: Vec<String>,
    pub technical_details: Vec<String>,
    pub reviews: Vec<String>,

    /// Keys holding the text of one review object
    pub review_text_keys: Vec<String>,

    pub search_results: Vec<String>,

    /// Key holding the product id of one search result
    pub search_id_key: String,
}

impl Default for ApiPointers {
    fn default() -> Self {
        Self {
            title: vec![
                "/product_results/title".to_string(),
                "/product/title".to_string(),
                "/title".to_string(),
            ],
            features: vec![
                "/product_results/feature_bullets".to_string(),
                "/product/feature_bullets".to_string(),
                "/about_item".to_string(),
                "/feature_bullets".to_string(),
            ],
            technical_details: vec![
                "/product_results/specifications".to_string(),
                "/product/specifications".to_string(),
                "/specifications".to_string(),
                "/product_details".to_string(),
            ],
            reviews: vec![
                "/reviews".to_string(),
                "/product_results/reviews".to_string(),
                "/reviews_results".to_string(),
            ],
            review_text_keys: vec![
                "body".to_string(),
                "text".to_string(),
                "content".to_string(),
                "snippet".to_string(),
            ],
            search_results: vec![
                "/organic_results".to_string(),
                "/search_results".to_string(),
            ],
            search_id_key: "asin".to_string(),
        }
    }
}
