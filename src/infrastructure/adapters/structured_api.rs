//! Structured-data API backend
//!
//! Every call goes to one search endpoint, keyed by engine name, storefront
//! domain and product id. Reviews come back in a single capped call per
//! rating tier, so there is never a next page.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::pagination::{PageToken, ReviewPage};
use crate::domain::product::ProductIdentifier;
use crate::domain::product_input::Backend;
use crate::domain::raw_content::RawContent;
use crate::domain::review_quota::RatingTier;
use crate::domain::services::{FetchAdapter, HttpFetcher};
use crate::infrastructure::config::{ApiConfig, ParsingConfig, SiteConfig};
use crate::infrastructure::extraction_error::{ExtractionError, ExtractionResult};
use crate::infrastructure::parsing::ApiPayloadParser;

pub struct StructuredApiAdapter {
    fetcher: Arc<dyn HttpFetcher>,
    site: SiteConfig,
    api: ApiConfig,
    api_key: String,
    payload_parser: ApiPayloadParser,
}

impl StructuredApiAdapter {
    /// Fails with `MissingCredential` when no usable key is given
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        site: SiteConfig,
        api: ApiConfig,
        parsing: &ParsingConfig,
        api_key: Option<String>,
    ) -> ExtractionResult<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ExtractionError::MissingCredential {
                backend: Backend::StructuredApi.to_string(),
            })?;

        Ok(Self {
            fetcher,
            site,
            api,
            api_key,
            payload_parser: ApiPayloadParser::with_config(&parsing.api_pointers),
        })
    }

    /// Storefront host suffix the API expects, e.g. `amazon.fr`
    pub fn amazon_domain(&self, domain: &str) -> String {
        format!("{}.{}", self.site.site_name, domain)
    }

    async fn query(&self, params: &[(&str, &str)]) -> ExtractionResult<Value> {
        let endpoint = self.api.endpoint.as_str();
        if params.iter().any(|(_, value)| value.trim().is_empty()) {
            return Err(ExtractionError::missing_parameters(endpoint));
        }

        let mut full: Vec<(&str, &str)> = params.to_vec();
        full.push(("api_key", self.api_key.as_str()));

        let body = self.fetcher.get_text(endpoint, &full).await?;
        serde_json::from_str(&body).map_err(|e| ExtractionError::MalformedPayload {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl FetchAdapter for StructuredApiAdapter {
    fn backend(&self) -> Backend {
        Backend::StructuredApi
    }

    async fn search_product(&self, domain: &str, query: &str) -> ExtractionResult<Option<String>> {
        let amazon_domain = self.amazon_domain(domain);
        let payload = self
            .query(&[
                ("engine", self.api.search_engine.as_str()),
                ("amazon_domain", amazon_domain.as_str()),
                ("search_term", query),
            ])
            .await?;
        Ok(self.payload_parser.first_search_id(&payload))
    }

    async fn fetch_product(&self, identifier: &ProductIdentifier) -> ExtractionResult<RawContent> {
        let amazon_domain = self.amazon_domain(identifier.domain());
        let payload = self
            .query(&[
                ("engine", self.api.product_engine.as_str()),
                ("amazon_domain", amazon_domain.as_str()),
                ("asin", identifier.product_id()),
            ])
            .await?;
        Ok(RawContent::json(self.api.endpoint.clone(), payload))
    }

    async fn fetch_reviews(
        &self,
        identifier: &ProductIdentifier,
        tier: RatingTier,
        page: PageToken,
    ) -> ExtractionResult<ReviewPage> {
        let amazon_domain = self.amazon_domain(identifier.domain());
        let star_filter = format!("{}_star", tier.word());
        let cap = self.api.review_result_cap.to_string();
        debug!("{}★ reviews via API (page token {} ignored)", tier, page.page_number());

        let payload = self
            .query(&[
                ("engine", self.api.reviews_engine.as_str()),
                ("amazon_domain", amazon_domain.as_str()),
                ("asin", identifier.product_id()),
                ("filter_by_star", star_filter.as_str()),
                ("num", cap.as_str()),
            ])
            .await?;
        Ok(ReviewPage::last(RawContent::json(self.api.endpoint.clone(), payload)))
    }
}
