use prospector::HarvestProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: HarvestProgress) {
        match event {
            HarvestProgress::LoadingStargazers { id, page } => {
                tracing::debug!(repository = %id, page, "Fetching stargazer page");
            }

            HarvestProgress::StargazerPage {
                id,
                page,
                count,
                total_so_far,
            } => {
                tracing::debug!(repository = %id, page, count, total_so_far, "Fetched stargazer page");
            }

            HarvestProgress::PaginationStopped { id, page, error } => {
                tracing::warn!(repository = %id, page, error = %error, "Pagination stopped early");
            }

            HarvestProgress::StargazersLoaded {
                id,
                total,
                from_cache,
            } => {
                if from_cache {
                    tracing::info!(repository = %id, total, "Reusing cached stargazer list");
                } else {
                    tracing::info!(repository = %id, total, "Stargazer list loaded");
                }
            }

            HarvestProgress::ProspectingUser { login } => {
                tracing::debug!(login = %login, "Fetching event feed");
            }

            HarvestProgress::EmailFound { login, email } => {
                tracing::info!(login = %login, email = %email, "Contact email found");
            }

            HarvestProgress::EmailUnavailable { login } => {
                tracing::info!(login = %login, "No usable email in event feed");
            }

            HarvestProgress::EmailExcluded { login } => {
                tracing::info!(login = %login, "Email excluded as GitHub-owned");
            }

            HarvestProgress::UserPruned { id, login } => {
                tracing::info!(repository = %id, login = %login, "Pruned vanished account");
            }

            HarvestProgress::RateLimitPause {
                resume_at,
                retry_after_ms,
            } => {
                tracing::warn!(resume_at = %resume_at, retry_after_ms, "Rate limited, pausing");
            }

            HarvestProgress::PassFailed { error } => {
                tracing::warn!(error = %error, "Pass failed, retrying immediately");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
