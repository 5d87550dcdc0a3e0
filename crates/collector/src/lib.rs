//! ghcard Data Collector
//!
//! Fetches public profile and repository data from the GitHub REST API.

pub mod github;

pub use github::{GithubCollector, RawRepo, RawUser};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl CollectorError {
    /// Unknown users and exhausted rate limits are reported to callers as
    /// the same condition.
    pub fn is_not_found_like(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::RateLimited(_))
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Configuration for collectors
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub api_base: String,
    pub user_agent: String,
    /// Repositories requested in the single page we fetch (GitHub caps this at 100).
    pub per_page: u8,
}

impl CollectorConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_base: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            user_agent: format!("ghcard/{}", env!("CARGO_PKG_VERSION")),
            per_page: 100,
        }
    }
}
