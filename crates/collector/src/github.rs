//! GitHub API collector

use crate::{CollectorConfig, CollectorError, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Public profile as returned by `GET /users/{login}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
}

/// One entry of `GET /users/{login}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRepo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// GitHub API client
#[derive(Clone)]
pub struct GithubCollector {
    client: Client,
    config: CollectorConfig,
}

impl GithubCollector {
    /// Create a new GitHub collector
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        // Fail on a malformed base URL now rather than on the first request.
        Url::parse(&config.api_base)
            .map_err(|e| CollectorError::InvalidUrl(format!("{}: {}", config.api_base, e)))?;

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, config })
    }

    /// Fetch a user's profile and the first page of their repositories,
    /// most recently updated first.
    pub async fn fetch_profile(&self, login: &str) -> Result<(RawUser, Vec<RawRepo>)> {
        info!(login = login, "Fetching GitHub profile");

        let user = self.fetch_user(login).await?;
        let repos = self.fetch_repos(&user.login).await?;

        info!(login = %user.login, repos = repos.len(), "Fetched GitHub profile");
        Ok((user, repos))
    }

    /// Fetch a single user's public profile
    pub async fn fetch_user(&self, login: &str) -> Result<RawUser> {
        let url = self.endpoint(login, &["users", login])?;
        debug!(url = %url, "Requesting user");

        let response = self.client.get(url).send().await?;
        Self::check_response(&response, login)?;

        let user: RawUser = response.json().await?;
        Ok(user)
    }

    /// Fetch one page of a user's repositories sorted by last update
    pub async fn fetch_repos(&self, login: &str) -> Result<Vec<RawRepo>> {
        let mut url = self.endpoint(login, &["users", login, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &self.config.per_page.min(100).to_string());
        debug!(url = %url, "Requesting repositories");

        let response = self.client.get(url).send().await?;
        Self::check_response(&response, login)?;

        let repos: Vec<RawRepo> = response.json().await?;
        Ok(repos)
    }

    /// Build an API URL; every segment is percent-encoded so a login can
    /// never escape its path position.
    fn endpoint(&self, login: &str, segments: &[&str]) -> Result<Url> {
        if login.trim().is_empty() {
            return Err(CollectorError::NotFound(login.to_string()));
        }

        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| CollectorError::InvalidUrl(format!("{}: {}", self.config.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| CollectorError::InvalidUrl(self.config.api_base.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn check_response(response: &Response, login: &str) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::NOT_FOUND {
            return Err(CollectorError::NotFound(login.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let wait = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(CollectorError::RateLimited(wait));
        }

        if status == StatusCode::FORBIDDEN {
            if let Some(remaining) = response.headers().get("x-ratelimit-remaining") {
                if remaining == "0" {
                    let reset = response
                        .headers()
                        .get("x-ratelimit-reset")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(60);

                    let now = Utc::now().timestamp().max(0) as u64;
                    let wait = reset.saturating_sub(now);

                    return Err(CollectorError::RateLimited(wait));
                }
            }
        }

        Err(CollectorError::Api(format!("GitHub API error: {}", status)))
    }
}
