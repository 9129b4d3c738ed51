//! Extraction service trait definitions
//!
//! The engine only talks to the network through these two seams: a raw
//! transport (`HttpFetcher`) and a backend adapter (`FetchAdapter`) built on
//! top of it. Both are object safe and `Send + Sync`.

use async_trait::async_trait;

use crate::domain::pagination::{PageToken, ReviewPage};
use crate::domain::product::ProductIdentifier;
use crate::domain::product_input::Backend;
use crate::domain::raw_content::RawContent;
use crate::domain::review_quota::RatingTier;
use crate::infrastructure::extraction_error::ExtractionResult;

/// Raw HTTP GET capability
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url` with the given query parameters and return the body text.
    ///
    /// Any response other than 200 fails with `FetchFailed`.
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> ExtractionResult<String>;
}

/// Backend adapter: direct page scraping or a structured-data API
#[async_trait]
pub trait FetchAdapter: Send + Sync {
    /// Which backend this adapter talks to
    fn backend(&self) -> Backend;

    /// Run a site search and return the first result's product id, if any
    async fn search_product(&self, domain: &str, query: &str) -> ExtractionResult<Option<String>>;

    /// Fetch the raw product content
    async fn fetch_product(&self, identifier: &ProductIdentifier) -> ExtractionResult<RawContent>;

    /// Fetch one page of reviews for a rating tier
    async fn fetch_reviews(
        &self,
        identifier: &ProductIdentifier,
        tier: RatingTier,
        page: PageToken,
    ) -> ExtractionResult<ReviewPage>;
}
