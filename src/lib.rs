//! Product Extractor - single-listing e-commerce product extraction
//!
//! Resolves a product id, name or page address to one listing, then collects
//! its title, feature bullets, specification table and rating-stratified
//! reviews through either direct page scraping or a structured-data API.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_utils;

// Re-export the main entry points
pub use application::{ExtractionRequest, ExtractionService, export_to_path, to_table_row};
pub use domain::{
    Backend, ProductIdentifier, ProductInput, ProductRecord, RatingTier, Review, ReviewQuota,
};
pub use infrastructure::{AppConfig, ExtractionError, ExtractionResult};
