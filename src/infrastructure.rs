//! Infrastructure layer for configuration, transport, parsing and backends
//!
//! This module provides the HTTP client, the two fetch adapters, HTML/JSON
//! parsing, the error taxonomy, configuration and logging setup.

pub mod adapters; // Direct-scrape and structured-API backends
pub mod config; // Configuration constants and helpers
pub mod extraction_error;
pub mod logging; // Logging infrastructure
pub mod parsing; // Selector and pointer based field extraction
pub mod simple_http_client;
pub mod user_agents;

// Re-export commonly used items
pub use adapters::{DirectScrapeAdapter, StructuredApiAdapter, build_adapter};
pub use config::{AppConfig, ConfigManager, LoggingConfig};
pub use extraction_error::{ExtractionError, ExtractionResult};
pub use logging::{get_log_directory, init_logging_with_config};
pub use parsing::{FieldExtractor, ParsingConfig};
pub use simple_http_client::HttpClient;
pub use user_agents::UserAgentPool;
