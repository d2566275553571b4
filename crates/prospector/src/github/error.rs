//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur when talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The primary or secondary rate limit was hit (HTTP 403/429).
    #[error("rate limit exceeded (HTTP {status})")]
    RateLimited { status: u16 },

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-success HTTP status.
    #[error("GitHub returned HTTP {status} for {resource}")]
    Http { status: u16, resource: String },

    /// The response body could not be decoded.
    #[error("failed to decode response for {resource}: {source}")]
    Decode {
        resource: String,
        source: serde_json::Error,
    },

    /// Connection-level failure before any HTTP status was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GitHubError {
    /// Check if this error is a rate limit signal (retryable after a delay).
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Check if this error means the resource does not exist.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Extract a short error message suitable for single-line display.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_is_classified() {
        let err = GitHubError::RateLimited { status: 403 };
        assert!(err.is_rate_limited());
        assert!(!err.is_not_found());

        let err = GitHubError::NotFound {
            resource: "users/ghost".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert!(err.is_not_found());

        let err = GitHubError::Http {
            status: 500,
            resource: "repos/a/b/stargazers".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert!(!err.is_not_found());
    }

    #[test]
    fn short_error_message_takes_first_line() {
        let err = std::io::Error::other("line one\nline two");
        assert_eq!(short_error_message(&err), "line one");
    }
}
