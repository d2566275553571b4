//! Harvest-level error taxonomy.

use thiserror::Error;

use crate::github::GitHubError;
use crate::store::StoreError;

/// Errors that unwind a harvest pass to the retry orchestrator.
///
/// `NotFound` never appears here: a missing user is handled in place by
/// pruning the stale login, not by failing the pass.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The rate limit was reached. The orchestrator checkpoints and sleeps
    /// for the configured delay before resuming.
    #[error("the rate limit was reached")]
    RateLimited,

    /// Any other API failure. Treated as transient and retried immediately.
    #[error(transparent)]
    Api(GitHubError),

    /// A checkpoint flush failed. Also treated as transient.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HarvestError {
    /// Check if this error is the rate limit signal.
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

impl From<GitHubError> for HarvestError {
    fn from(err: GitHubError) -> Self {
        if err.is_rate_limited() {
            Self::RateLimited
        } else {
            Self::Api(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_rate_limit_converts_to_rate_limited() {
        let err: HarvestError = GitHubError::RateLimited { status: 403 }.into();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn other_github_errors_convert_to_api() {
        let err: HarvestError = GitHubError::Http {
            status: 500,
            resource: "repos/a/b/stargazers".to_string(),
        }
        .into();
        assert!(!err.is_rate_limited());
        assert!(matches!(err, HarvestError::Api(_)));
    }
}
