//! Fetch adapters: one per backend, same contract
//!
//! The backend is picked once per session through [`build_adapter`]; the
//! engine never branches on it afterwards.

pub mod direct_scrape;
pub mod structured_api;

pub use direct_scrape::DirectScrapeAdapter;
pub use structured_api::StructuredApiAdapter;

use std::sync::Arc;
use tracing::debug;

use crate::domain::product_input::Backend;
use crate::domain::services::{FetchAdapter, HttpFetcher};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::extraction_error::ExtractionResult;

/// Adapter for `backend`.
///
/// `api_key` takes precedence over the configured key. The structured API
/// backend fails here, before any request, when neither is set.
pub fn build_adapter(
    backend: Backend,
    config: &AppConfig,
    fetcher: Arc<dyn HttpFetcher>,
    api_key: Option<String>,
) -> ExtractionResult<Box<dyn FetchAdapter>> {
    debug!("Building {} adapter", backend);
    match backend {
        Backend::DirectScrape => Ok(Box::new(DirectScrapeAdapter::new(
            fetcher,
            config.site.clone(),
            &config.parsing,
        )?)),
        Backend::StructuredApi => Ok(Box::new(StructuredApiAdapter::new(
            fetcher,
            config.site.clone(),
            config.api.clone(),
            &config.parsing,
            api_key.or_else(|| config.api.api_key.clone()),
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::extraction_error::ExtractionError;
    use crate::test_utils::RecordingFetcher;

    fn fetcher() -> Arc<dyn HttpFetcher> {
        Arc::new(RecordingFetcher::new(|_| Ok(String::new())))
    }

    #[test]
    fn test_builds_requested_backend() {
        let config = AppConfig::default();
        let scrape = build_adapter(Backend::DirectScrape, &config, fetcher(), None).unwrap();
        assert_eq!(scrape.backend(), Backend::DirectScrape);

        let api = build_adapter(Backend::StructuredApi, &config, fetcher(), Some("k".into())).unwrap();
        assert_eq!(api.backend(), Backend::StructuredApi);
    }

    #[test]
    fn test_configured_key_used_when_none_given() {
        let mut config = AppConfig::default();
        assert!(matches!(
            build_adapter(Backend::StructuredApi, &config, fetcher(), None),
            Err(ExtractionError::MissingCredential { .. })
        ));

        config.api.api_key = Some("from-config".into());
        assert!(build_adapter(Backend::StructuredApi, &config, fetcher(), None).is_ok());
    }
}
