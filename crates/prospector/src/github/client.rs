//! GitHub API client and the fetch seam consumed by the harvest engine.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

use super::error::GitHubError;
use super::types::Stargazer;

/// Base URL for the GitHub REST API.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Page size for the stargazer listing.
const PER_PAGE: u32 = 100;

/// The two fetch capabilities the harvest engine consumes.
///
/// The engine only ever talks to GitHub through this trait, which keeps the
/// transport swappable and lets tests drive the engine with scripted
/// responses.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetch one page (1-indexed) of a repository's stargazer listing.
    ///
    /// An empty page signals the end of the listing.
    async fn stargazer_page(&self, id: &str, page: u32) -> Result<Vec<Stargazer>, GitHubError>;

    /// Fetch a user's public event feed as serialized JSON text.
    ///
    /// The caller pattern-matches over the serialized form rather than
    /// decoding the heterogeneous event payloads structurally.
    async fn user_events(&self, login: &str) -> Result<String, GitHubError>;
}

/// Build the API route for one stargazer page.
fn stargazers_route(id: &str, page: u32) -> String {
    format!("/repos/{}/stargazers?per_page={}&page={}", id, PER_PAGE, page)
}

/// Build the API route for a user's public event feed.
fn events_route(login: &str) -> String {
    format!("/users/{}/events", login)
}

/// Authenticated reqwest-backed GitHub client.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

// Manual Debug so the token can never leak into logs.
impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubClient {
    /// Create a client from a personal access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (e.g. for a GitHub Enterprise instance).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issue an authenticated GET and classify the response status.
    ///
    /// 403 and 429 are both treated as rate limit signals; GitHub reports
    /// the secondary rate limit as a plain 403.
    async fn get_json(&self, route: &str) -> Result<serde_json::Value, GitHubError> {
        let url = format!("{}{}", self.base_url, route);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, "prospector")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|source| GitHubError::Decode {
                    resource: route.to_string(),
                    source,
                })
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                Err(GitHubError::RateLimited {
                    status: status.as_u16(),
                })
            }
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource: route.to_string(),
            }),
            s => Err(GitHubError::Http {
                status: s.as_u16(),
                resource: route.to_string(),
            }),
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn stargazer_page(
        &self,
        id: &str,
        page: u32,
    ) -> Result<Vec<Stargazer>, GitHubError> {
        let route = stargazers_route(id, page);
        let value = self.get_json(&route).await?;
        serde_json::from_value(value).map_err(|source| GitHubError::Decode {
            resource: route,
            source,
        })
    }

    async fn user_events(&self, login: &str) -> Result<String, GitHubError> {
        let value = self.get_json(&events_route(login)).await?;
        // Re-serialize compactly so downstream pattern matching sees one
        // canonical form regardless of how the server formats the body.
        Ok(value.to_string())
    }
}
