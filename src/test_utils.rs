//! In-memory fakes for unit tests

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::pagination::{PageToken, ReviewPage};
use crate::domain::product::ProductIdentifier;
use crate::domain::product_input::Backend;
use crate::domain::raw_content::RawContent;
use crate::domain::review_quota::RatingTier;
use crate::domain::services::{FetchAdapter, HttpFetcher};
use crate::infrastructure::extraction_error::{ExtractionError, ExtractionResult};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Responder = Box<dyn Fn(&RecordedRequest) -> ExtractionResult<String> + Send + Sync>;

/// `HttpFetcher` that answers from a closure and records every request
pub struct RecordingFetcher {
    respond: Responder,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingFetcher {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&RecordedRequest) -> ExtractionResult<String> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl HttpFetcher for RecordingFetcher {
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> ExtractionResult<String> {
        let request = RecordedRequest {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        };
        self.requests.lock().unwrap().push(request.clone());
        (self.respond)(&request)
    }
}

/// Scripted answer for one review page fetch
#[derive(Debug, Clone)]
pub enum PageScript {
    Texts(Vec<&'static str>, Option<u32>),
    Fail(u16),
}

/// `FetchAdapter` with a fixed product payload and scripted review pages
/// keyed by (tier, page number). Unscripted pages come back empty.
#[derive(Default)]
pub struct ScriptedAdapter {
    pub product: Option<serde_json::Value>,
    pub product_status: Option<u16>,
    pub search_result: Option<String>,
    pages: HashMap<(u8, u32), PageScript>,
    calls: Mutex<Vec<(u8, u32)>>,
}

impl ScriptedAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_product(mut self, payload: serde_json::Value) -> Self {
        self.product = Some(payload);
        self
    }

    #[must_use]
    pub fn with_search_result(mut self, id: &str) -> Self {
        self.search_result = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn failing_product(mut self, status: u16) -> Self {
        self.product_status = Some(status);
        self
    }

    /// Page of review texts, continuing to `next` when given
    #[must_use]
    pub fn page(mut self, tier: u8, page: u32, texts: Vec<&'static str>, next: Option<u32>) -> Self {
        self.pages.insert((tier, page), PageScript::Texts(texts, next));
        self
    }

    #[must_use]
    pub fn failing_page(mut self, tier: u8, page: u32, status: u16) -> Self {
        self.pages.insert((tier, page), PageScript::Fail(status));
        self
    }

    /// Review fetches made so far as (tier, page number)
    pub fn review_calls(&self) -> Vec<(u8, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchAdapter for ScriptedAdapter {
    fn backend(&self) -> Backend {
        Backend::StructuredApi
    }

    async fn search_product(&self, _domain: &str, _query: &str) -> ExtractionResult<Option<String>> {
        Ok(self.search_result.clone())
    }

    async fn fetch_product(&self, identifier: &ProductIdentifier) -> ExtractionResult<RawContent> {
        if let Some(status) = self.product_status {
            return Err(ExtractionError::fetch_failed(
                status,
                &format!("scripted://product/{}", identifier.product_id()),
            ));
        }
        Ok(RawContent::json(
            "scripted://product",
            self.product.clone().unwrap_or_else(|| json!({})),
        ))
    }

    async fn fetch_reviews(
        &self,
        _identifier: &ProductIdentifier,
        tier: RatingTier,
        page: PageToken,
    ) -> ExtractionResult<ReviewPage> {
        let key = (tier.value(), page.page_number());
        self.calls.lock().unwrap().push(key);
        let url = format!("scripted://reviews/{}/{}", key.0, key.1);

        match self.pages.get(&key) {
            Some(PageScript::Fail(status)) => Err(ExtractionError::fetch_failed(*status, &url)),
            Some(PageScript::Texts(texts, next)) => {
                let reviews: Vec<_> = texts.iter().map(|t| json!({ "body": t })).collect();
                let content = RawContent::json(url, json!({ "reviews": reviews }));
                Ok(ReviewPage {
                    content,
                    next: next.map(PageToken::from_page_number),
                })
            }
            None => Ok(ReviewPage::last(RawContent::json(url, json!({ "reviews": [] })))),
        }
    }
}
