//! Direct page scraping backend
//!
//! Builds canonical storefront addresses and hands the HTML back untouched.
//! Review pages always point at the following page number; the collector
//! stops a tier on the first page without review text.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::pagination::{PageToken, ReviewPage};
use crate::domain::product::ProductIdentifier;
use crate::domain::product_input::Backend;
use crate::domain::raw_content::RawContent;
use crate::domain::review_quota::RatingTier;
use crate::domain::services::{FetchAdapter, HttpFetcher};
use crate::infrastructure::config::{ParsingConfig, SiteConfig};
use crate::infrastructure::extraction_error::ExtractionResult;
use crate::infrastructure::parsing::SearchResultParser;

pub struct DirectScrapeAdapter {
    fetcher: Arc<dyn HttpFetcher>,
    site: SiteConfig,
    search_parser: SearchResultParser,
}

impl DirectScrapeAdapter {
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        site: SiteConfig,
        parsing: &ParsingConfig,
    ) -> ExtractionResult<Self> {
        Ok(Self {
            fetcher,
            site,
            search_parser: SearchResultParser::with_config(&parsing.search_selectors)?,
        })
    }

    /// `https://www.<site>.<domain>/dp/<id>`
    pub fn product_url(&self, identifier: &ProductIdentifier) -> String {
        format!(
            "{}{}{}",
            self.site.base_url(identifier.domain()),
            self.site.product_path_marker,
            identifier.product_id()
        )
    }

    pub fn search_url(&self, domain: &str) -> String {
        format!("{}/s", self.site.base_url(domain))
    }

    /// Reviews listing filtered to one star rating, 1-based page number
    pub fn reviews_url(
        &self,
        identifier: &ProductIdentifier,
        tier: RatingTier,
        page: PageToken,
    ) -> String {
        format!(
            "{}/product-reviews/{}/?filterByStar={}_star&pageNumber={}",
            self.site.base_url(identifier.domain()),
            identifier.product_id(),
            tier.value(),
            page.page_number()
        )
    }
}

#[async_trait]
impl FetchAdapter for DirectScrapeAdapter {
    fn backend(&self) -> Backend {
        Backend::DirectScrape
    }

    async fn search_product(&self, domain: &str, query: &str) -> ExtractionResult<Option<String>> {
        let url = self.search_url(domain);
        let body = self.fetcher.get_text(&url, &[("k", query)]).await?;
        Ok(self.search_parser.first_product_id(&body))
    }

    async fn fetch_product(&self, identifier: &ProductIdentifier) -> ExtractionResult<RawContent> {
        let url = self.product_url(identifier);
        let body = self.fetcher.get_text(&url, &[]).await?;
        Ok(RawContent::html(url, body))
    }

    async fn fetch_reviews(
        &self,
        identifier: &ProductIdentifier,
        tier: RatingTier,
        page: PageToken,
    ) -> ExtractionResult<ReviewPage> {
        let url = self.reviews_url(identifier, tier, page);
        let body = self.fetcher.get_text(&url, &[]).await?;
        Ok(ReviewPage::with_next(RawContent::html(url, body), page.next()))
    }
}
