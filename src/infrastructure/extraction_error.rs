//! Error taxonomy for identifier resolution, fetching and extraction
//!
//! Fatal variants abort a session; review fetch failures are caught per
//! rating tier by the collector and never reach the caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Invalid product address (no product identifier found): {address}")]
    InvalidAddress { address: String },

    #[error("No product found for the query: {query}")]
    NotFound { query: String },

    #[error("Request failed ({}) for URL: {url}", status_label(.status))]
    FetchFailed { status: Option<u16>, url: String },

    #[error("The {backend} backend requires an API key")]
    MissingCredential { backend: String },

    #[error("Network error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Malformed payload from {url}: {reason}")]
    MalformedPayload { url: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {code}"),
        None => "missing parameters".to_string(),
    }
}

impl ExtractionError {
    /// Non-success HTTP status
    pub fn fetch_failed(status: u16, url: &str) -> Self {
        Self::FetchFailed {
            status: Some(status),
            url: url.to_string(),
        }
    }

    /// Request that could not be issued because a required parameter is empty
    pub fn missing_parameters(url: &str) -> Self {
        Self::FetchFailed {
            status: None,
            url: url.to_string(),
        }
    }

    pub fn transport(url: &str, error: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// HTTP status carried by a `FetchFailed`, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the error comes from talking to a backend, as opposed to bad input or setup
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::Transport { .. } | Self::MalformedPayload { .. }
        )
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
