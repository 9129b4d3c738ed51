use serde_json::Value;

use super::product_input::Backend;

/// Backend payload as fetched, before field extraction.
///
/// HTML is kept as text and parsed on demand so the content can cross
/// await points.
#[derive(Debug, Clone)]
pub enum RawContent {
    Html { url: String, body: String },
    Json { url: String, body: Value },
}

impl RawContent {
    pub fn html(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Html {
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn json(url: impl Into<String>, body: Value) -> Self {
        Self::Json {
            url: url.into(),
            body,
        }
    }

    /// Adapter that produced this payload
    pub fn source(&self) -> Backend {
        match self {
            Self::Html { .. } => Backend::DirectScrape,
            Self::Json { .. } => Backend::StructuredApi,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Html { url, .. } | Self::Json { url, .. } => url,
        }
    }
}
