//! Extraction session: one inbound request in, one product record out
//!
//! The backend adapter is built once per request and used for every fetch
//! of that request. Nothing carries over between requests.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::identifier_resolver::IdentifierResolver;
use super::record_assembler::RecordAssembler;
use crate::domain::product::ProductRecord;
use crate::domain::product_input::{Backend, ProductInput};
use crate::domain::review_quota::ReviewQuota;
use crate::domain::services::HttpFetcher;
use crate::infrastructure::adapters::build_adapter;
use crate::infrastructure::config::{AppConfig, defaults};
use crate::infrastructure::extraction_error::ExtractionResult;
use crate::infrastructure::parsing::FieldExtractor;
use crate::infrastructure::simple_http_client::HttpClient;

/// Parameters of one extraction, as collected from the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub input: ProductInput,
    pub domain_hint: String,
    pub include_reviews: bool,
    pub review_quota: ReviewQuota,
    pub backend: Backend,
    #[serde(default, skip_serializing)]
    pub api_credential: Option<String>,
}

impl ExtractionRequest {
    /// Direct scraping with the default review quota on every tier
    pub fn new(input: ProductInput, domain_hint: impl Into<String>) -> Self {
        Self {
            input,
            domain_hint: domain_hint.into(),
            include_reviews: true,
            review_quota: ReviewQuota::uniform(defaults::REVIEWS_PER_TIER),
            backend: Backend::DirectScrape,
            api_credential: None,
        }
    }

    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_quota(mut self, quota: ReviewQuota) -> Self {
        self.review_quota = quota;
        self
    }

    #[must_use]
    pub fn with_api_credential(mut self, credential: impl Into<String>) -> Self {
        self.api_credential = Some(credential.into());
        self
    }

    #[must_use]
    pub fn without_reviews(mut self) -> Self {
        self.include_reviews = false;
        self
    }
}

/// Runs extraction requests against a shared transport
pub struct ExtractionService {
    config: AppConfig,
    fetcher: Arc<dyn HttpFetcher>,
    resolver: IdentifierResolver,
    assembler: RecordAssembler,
}

impl ExtractionService {
    /// Service backed by the reqwest client built from `config.http`
    pub fn new(config: AppConfig) -> ExtractionResult<Self> {
        let fetcher = Arc::new(HttpClient::new(config.http.clone())?);
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn HttpFetcher>) -> ExtractionResult<Self> {
        let resolver = IdentifierResolver::new(&config.site)?;
        let assembler = RecordAssembler::new(FieldExtractor::with_config(&config.parsing)?);
        Ok(Self {
            config,
            fetcher,
            resolver,
            assembler,
        })
    }

    /// Resolve the input, then fetch and assemble the record.
    ///
    /// A missing API key fails here before any request is sent.
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractionResult<ProductRecord> {
        let adapter = build_adapter(
            request.backend,
            &self.config,
            Arc::clone(&self.fetcher),
            request.api_credential.clone(),
        )?;

        let session_id = Uuid::new_v4();
        let span = info_span!("extraction", %session_id, backend = %request.backend);

        async {
            info!("🚀 Extracting {:?}", request.input.value());
            let identifier = self
                .resolver
                .resolve(&request.input, &request.domain_hint, adapter.as_ref())
                .await?;

            self.assembler
                .assemble(
                    identifier,
                    adapter.as_ref(),
                    &request.review_quota,
                    request.include_reviews,
                )
                .await
        }
        .instrument(span)
        .await
    }
}
