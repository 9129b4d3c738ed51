//! Configuration infrastructure
//!
//! Contains configuration loading and management for product extraction.
//!
//! Configuration is organized into independent sections:
//! 1. Site addressing (which storefront, how its URLs look)
//! 2. HTTP transport (timeouts, pacing, user-agent pool)
//! 3. Structured-data API (endpoint, engine names, credential)
//! 4. Parsing selectors and logging
//!
//! Every section is `#[serde(default)]`, so a config file only needs the keys
//! it wants to override.

#![allow(clippy::derivable_impls)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub use crate::infrastructure::parsing::config::ParsingConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storefront addressing
    pub site: SiteConfig,

    /// HTTP client behaviour
    pub http: HttpClientConfig,

    /// Third-party structured-data API
    pub api: ApiConfig,

    /// CSS selectors and JSON pointers used by the extractors
    pub parsing: ParsingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Storefront addressing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name used in host names ("www.<site_name>.<domain>")
    pub site_name: String,

    /// Base URL template; `{site}` and `{domain}` are substituted
    pub base_url_template: String,

    /// Path marker that precedes the product id in a product address
    pub product_path_marker: String,
}

impl SiteConfig {
    /// Base URL for a locale, e.g. `https://www.amazon.fr`
    pub fn base_url(&self, domain: &str) -> String {
        self.base_url_template
            .replace("{site}", &self.site_name)
            .replace("{domain}", domain)
            .trim_end_matches('/')
            .to_string()
    }

    /// Host prefix stripped from addresses and domain hints ("www.amazon.")
    pub fn host_prefix(&self) -> String {
        format!("www.{}.", self.site_name)
    }
}

/// HTTP client configuration for fetching pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum requests per second; 0 disables pacing
    pub max_requests_per_second: u32,

    /// Whether to follow redirects
    pub follow_redirects: bool,

    /// User agents picked from for each request
    pub user_agents: Vec<String>,

    /// Seed for user-agent selection; random when absent
    pub user_agent_seed: Option<u64>,
}

/// Structured-data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Search endpoint every API request goes to
    pub endpoint: String,

    /// Engine name for product lookups
    pub product_engine: String,

    /// Engine name for free-text searches
    pub search_engine: String,

    /// Engine name for review listings
    pub reviews_engine: String,

    /// Upper bound on reviews requested per rating tier
    pub review_result_cap: u32,

    /// API key; CLI flag and environment override this value
    pub api_key: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (stderr)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to the user data directory
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: defaults::SITE_NAME.to_string(),
            base_url_template: defaults::BASE_URL_TEMPLATE.to_string(),
            product_path_marker: defaults::PRODUCT_PATH_MARKER.to_string(),
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            follow_redirects: true,
            user_agents: defaults::USER_AGENTS.iter().map(|s| (*s).to_string()).collect(),
            user_agent_seed: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::API_ENDPOINT.to_string(),
            product_engine: defaults::API_PRODUCT_ENGINE.to_string(),
            search_engine: defaults::API_SEARCH_ENGINE.to_string(),
            reviews_engine: defaults::API_REVIEWS_ENGINE.to_string(),
            review_result_cap: defaults::API_REVIEW_RESULT_CAP,
            api_key: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut module_filters = HashMap::new();
        module_filters.insert("reqwest".to_string(), "warn".to_string());
        module_filters.insert("hyper".to_string(), "warn".to_string());

        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            module_filters,
        }
    }
}

/// Configuration manager for loading and saving settings
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Configuration manager for the default per-user config file
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Configuration manager for an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            debug!(
                "No config file at {:?}, using defaults",
                self.config_path
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read config file: {:?}", self.config_path))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", self.config_path))?;

        info!("Loaded configuration from {:?}", self.config_path);
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON, creating parent directories
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create config directory: {parent:?}"))?;
            }
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .with_context(|| format!("Failed to write config file: {:?}", self.config_path))?;

        info!("Saved configuration to {:?}", self.config_path);
        Ok(())
    }
}

/// Default configuration values
pub mod defaults {
    /// Directory name under the user config/data directories
    pub const APP_DIR_NAME: &str = "product-extractor";

    /// Config file name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Default storefront name
    pub const SITE_NAME: &str = "amazon";

    /// Default base URL template
    pub const BASE_URL_TEMPLATE: &str = "https://www.{site}.{domain}";

    /// Marker preceding the 10-character product id in product addresses
    pub const PRODUCT_PATH_MARKER: &str = "/dp/";

    /// Default locale when none is given
    pub const DOMAIN: &str = "fr";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// Default pacing of outgoing requests
    pub const MAX_REQUESTS_PER_SECOND: u32 = 2;

    /// Desktop browser user agents used for page requests
    pub const USER_AGENTS: [&str; 3] = [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36",
    ];

    /// Structured-data API endpoint
    pub const API_ENDPOINT: &str = "https://serpapi.com/search.json";

    pub const API_PRODUCT_ENGINE: &str = "amazon_product";
    pub const API_SEARCH_ENGINE: &str = "amazon";
    pub const API_REVIEWS_ENGINE: &str = "amazon_reviews";

    /// Default cap on reviews requested per tier from the API
    pub const API_REVIEW_RESULT_CAP: u32 = 100;

    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "PRODUCT_EXTRACTOR_API_KEY";

    /// Default reviews requested per tier by the CLI
    pub const REVIEWS_PER_TIER: u32 = 2;

    /// Upper bound the CLI accepts per tier
    pub const MAX_REVIEWS_PER_TIER: u32 = 100;

    /// Default log level
    pub const LOG_LEVEL: &str = "info";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_substitution() {
        let site = SiteConfig::default();
        assert_eq!(site.base_url("fr"), "https://www.amazon.fr");
        assert_eq!(site.base_url("co.uk"), "https://www.amazon.co.uk");
        assert_eq!(site.host_prefix(), "www.amazon.");
    }

    #[test]
    fn test_base_url_without_placeholders() {
        let site = SiteConfig {
            base_url_template: "http://127.0.0.1:8080/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(site.base_url("fr"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "site": { "site_name": "example" }, "http": { "timeout_seconds": 5 } }"#)
                .unwrap();
        assert_eq!(config.site.site_name, "example");
        assert_eq!(config.site.product_path_marker, "/dp/");
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.user_agents.len(), 3);
        assert_eq!(config.api.product_engine, "amazon_product");
    }

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("absent.json"));
        let config = manager.load_config().await.unwrap();
        assert_eq!(config.site.site_name, "amazon");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));

        let mut config = AppConfig::default();
        config.api.api_key = Some("secret".to_string());
        config.http.max_requests_per_second = 0;
        manager.save_config(&config).await.unwrap();

        let loaded = manager.load_config().await.unwrap();
        assert_eq!(loaded.api.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.http.max_requests_per_second, 0);
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ConfigManager::with_path(&path).load_config().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
