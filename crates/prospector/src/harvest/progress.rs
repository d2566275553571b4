//! Progress events emitted while harvesting.

use chrono::{DateTime, Utc};

/// Progress events for pagination, prospecting, and the retry loop.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum HarvestProgress {
    /// About to fetch one page of a repository's stargazer listing.
    LoadingStargazers {
        /// Repository identifier (`owner/name`).
        id: String,
        /// Page number (1-indexed).
        page: u32,
    },

    /// Fetched a page of stargazers.
    StargazerPage {
        id: String,
        page: u32,
        /// Logins on this page.
        count: usize,
        /// Running total across pages.
        total_so_far: usize,
    },

    /// Pagination ended early on a non-rate-limit error; the accumulated
    /// prefix is kept and the repository is still marked loaded.
    PaginationStopped {
        id: String,
        page: u32,
        error: String,
    },

    /// A repository's stargazer list is settled.
    StargazersLoaded {
        id: String,
        total: usize,
        /// True when the cached snapshot was reused without any fetching.
        from_cache: bool,
    },

    /// About to fetch a user's event feed.
    ProspectingUser { login: String },

    /// A usable contact address was found and recorded.
    EmailFound { login: String, email: String },

    /// The feed contained no usable address; the user is now unreachable.
    EmailUnavailable { login: String },

    /// The only candidate address is GitHub-owned; the user is now
    /// unreachable.
    EmailExcluded { login: String },

    /// The login no longer exists; it was pruned from the repository's
    /// stargazer snapshot.
    UserPruned { id: String, login: String },

    /// Rate limited: state has been checkpointed and the engine is
    /// sleeping until `resume_at`.
    RateLimitPause {
        resume_at: DateTime<Utc>,
        retry_after_ms: u64,
    },

    /// A pass failed on an unclassified error and will be retried
    /// immediately.
    PassFailed { error: String },
}

/// Callback for progress updates during harvest operations.
pub type ProgressCallback = Box<dyn Fn(HarvestProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: HarvestProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn emit_with_callback_invokes_it() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        let callback: ProgressCallback = Box::new(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        emit(
            Some(&callback),
            HarvestProgress::StargazersLoaded {
                id: "owner/repo".to_string(),
                total: 3,
                from_cache: false,
            },
        );
        emit(
            Some(&callback),
            HarvestProgress::EmailFound {
                login: "alice".to_string(),
                email: "a@b.com".to_string(),
            },
        );

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn emit_without_callback_is_a_no_op() {
        emit(
            None,
            HarvestProgress::ProspectingUser {
                login: "alice".to_string(),
            },
        );
    }
}
