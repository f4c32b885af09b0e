use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Production endpoint used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://webbot-production-c4e6.up.railway.app";
/// Environment variable overriding the base endpoint.
pub const BASE_URL_ENV: &str = "RAGCHAT_API_URL";

/// Pages crawled per ingestion when the caller does not say otherwise.
pub const DEFAULT_MAX_PAGES: u32 = 5;
/// Crawl depth per ingestion when the caller does not say otherwise.
pub const DEFAULT_MAX_DEPTH: u32 = 1;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    /// Reads the base endpoint from `RAGCHAT_API_URL`, falling back to the
    /// hardcoded production default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Single error taxonomy for every client failure: network errors, non-2xx
/// statuses, and unparsable bodies all surface as one human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Success body of the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryAnswer {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProcessWebsiteRequest<'a> {
    pub url: &'a str,
    pub max_pages: u32,
    pub max_depth: u32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: String,
}
