use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the caller typed in to identify a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ProductInput {
    /// Product identifier used as-is
    RawId(String),
    /// Free-text product name resolved through a site search
    FreeText(String),
    /// Canonical product-page address
    Address(String),
}

impl ProductInput {
    pub fn value(&self) -> &str {
        match self {
            Self::RawId(v) | Self::FreeText(v) | Self::Address(v) => v,
        }
    }
}

/// Data backend used for a whole extraction session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Fetch and parse the site's own pages
    DirectScrape,
    /// Query a third-party structured-data API
    StructuredApi,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectScrape => "direct-scrape",
            Self::StructuredApi => "structured-api",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct-scrape" | "scrape" | "html" => Ok(Self::DirectScrape),
            "structured-api" | "api" => Ok(Self::StructuredApi),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}
