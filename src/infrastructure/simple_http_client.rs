//! HTTP client for page and API requests
//!
//! A thin reqwest wrapper with request pacing and per-request user-agent
//! selection. It never retries: a failed request is reported once.

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::header::USER_AGENT;
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use std::num::NonZeroU32;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::services::HttpFetcher;
use crate::infrastructure::config::HttpClientConfig;
use crate::infrastructure::extraction_error::{ExtractionError, ExtractionResult};
use crate::infrastructure::user_agents::UserAgentPool;

/// Query keys whose values never appear in logs or error messages
const SENSITIVE_QUERY_KEYS: [&str; 1] = ["api_key"];

/// HTTP client with pacing and user-agent rotation
pub struct HttpClient {
    client: Client,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    user_agents: UserAgentPool,
    rng: Mutex<fastrand::Rng>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> ExtractionResult<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .cookie_store(true)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| {
                ExtractionError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        let rate_limiter = NonZeroU32::new(config.max_requests_per_second)
            .map(|rate| RateLimiter::direct(Quota::per_second(rate)));

        let rng = match config.user_agent_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Ok(Self {
            client,
            rate_limiter,
            user_agents: UserAgentPool::new(config.user_agents.iter().cloned()),
            rng: Mutex::new(rng),
        })
    }

    fn next_user_agent(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.user_agents.pick(&mut rng).to_string()
    }
}

#[async_trait]
impl HttpFetcher for HttpClient {
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> ExtractionResult<String> {
        let request_url = build_url(url, query)?;
        let shown_url = redact_url(&request_url);

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let user_agent = self.next_user_agent();
        info!("🌐 HTTP GET: {}", shown_url);

        let response = self
            .client
            .get(request_url)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| ExtractionError::transport(&shown_url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("❌ HTTP {} for {}", status, shown_url);
            return Err(ExtractionError::fetch_failed(status.as_u16(), &shown_url));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ExtractionError::transport(&shown_url, e))?;

        debug!("Fetched {} ({} chars)", shown_url, text.len());
        Ok(text)
    }
}

fn build_url(url: &str, query: &[(&str, &str)]) -> ExtractionResult<Url> {
    let mut parsed = Url::parse(url).map_err(|e| ExtractionError::transport(url, e))?;
    if !query.is_empty() {
        parsed.query_pairs_mut().extend_pairs(query);
    }
    Ok(parsed)
}

/// URL text with sensitive query values masked
pub fn redact_url(url: &Url) -> String {
    let sensitive = |key: &str| SENSITIVE_QUERY_KEYS.contains(&key);
    if !url.query_pairs().any(|(key, _)| sensitive(&key)) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if sensitive(&key) {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
