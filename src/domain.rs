//! Domain module - Core business entities and service contracts
//!
//! This module contains the value objects that flow through an extraction
//! session and the service traits the engine depends on.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod pagination;
pub mod product;
pub mod product_input;
pub mod raw_content;
pub mod review_quota;
pub mod services;

// Re-export commonly used items for convenience
pub use pagination::{PageToken, ReviewPage};
pub use product::{
    ProductFields, ProductIdentifier, ProductRecord, Review, TechnicalDetails, TITLE_SENTINEL,
};
pub use product_input::{Backend, ProductInput};
pub use raw_content::RawContent;
pub use review_quota::{RatingTier, ReviewQuota};
pub use services::{FetchAdapter, HttpFetcher};
