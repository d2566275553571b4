//! Retry orchestrator: the top-level harvest loop.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use chrono::Utc;

use crate::github::{GitHubApi, short_error_message};
use crate::store::CheckpointStore;

use super::error::HarvestError;
use super::paginator::fetch_stargazers;
use super::progress::{HarvestProgress, ProgressCallback, emit};
use super::prospector::resolve_emails;
use super::types::{HarvestOptions, HarvestSummary};

/// Drives pagination and prospecting across all tracked repositories,
/// absorbing failures and resuming from checkpointed state.
///
/// A pass visits every repository in stable (key) order, paginating its
/// stargazers and resolving their emails. When a pass is interrupted the
/// whole pass restarts from the top; the idempotency of the paginator and
/// prospector makes replaying settled work free, so the loop always resumes
/// from exactly where it stopped.
pub struct Harvester {
    api: Arc<dyn GitHubApi>,
    store: CheckpointStore,
    options: HarvestOptions,
}

impl Harvester {
    pub fn new(api: Arc<dyn GitHubApi>, store: CheckpointStore, options: HarvestOptions) -> Self {
        Self {
            api,
            store,
            options,
        }
    }

    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    /// Give the checkpoint store back, e.g. to inspect final state.
    pub fn into_store(self) -> CheckpointStore {
        self.store
    }

    fn stop_requested(&self) -> bool {
        self.options
            .stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    /// Run until a full pass completes cleanly, or a stop is requested, or
    /// the optional pass bound is exhausted.
    ///
    /// No error escapes this loop: rate limits checkpoint state and sleep
    /// for the configured delay; anything else is logged and retried
    /// immediately. Liveness over precision.
    pub async fn run(&mut self, on_progress: Option<&ProgressCallback>) -> HarvestSummary {
        let mut summary = HarvestSummary::default();

        loop {
            summary.passes += 1;

            match self.run_pass(&mut summary, on_progress).await {
                Ok(()) => {
                    summary.completed = !self.stop_requested();
                    return summary;
                }
                Err(e) if e.is_rate_limited() => {
                    summary.rate_limit_pauses += 1;
                    self.checkpoint_before_pause();

                    if self.stopping_or_exhausted(&summary) {
                        return summary;
                    }

                    let retry_after = self.options.retry_delay;
                    let resume_at = Utc::now()
                        + chrono::Duration::from_std(retry_after)
                            .unwrap_or_else(|_| chrono::Duration::zero());
                    tracing::warn!(
                        resume_at = %resume_at,
                        "rate limit reached, pausing"
                    );
                    emit(
                        on_progress,
                        HarvestProgress::RateLimitPause {
                            resume_at,
                            retry_after_ms: retry_after.as_millis() as u64,
                        },
                    );
                    tokio::time::sleep(retry_after).await;
                }
                Err(e) => {
                    summary.immediate_retries += 1;
                    tracing::warn!(error = %e, "pass failed, retrying immediately");
                    emit(
                        on_progress,
                        HarvestProgress::PassFailed {
                            error: short_error_message(&e),
                        },
                    );

                    if self.stopping_or_exhausted(&summary) {
                        return summary;
                    }
                }
            }
        }
    }

    /// One pass over every tracked repository.
    async fn run_pass(
        &mut self,
        summary: &mut HarvestSummary,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<(), HarvestError> {
        let ids: Vec<String> = self.store.repositories().keys().cloned().collect();

        for id in ids {
            if self.stop_requested() {
                break;
            }

            let logins =
                fetch_stargazers(self.api.as_ref(), &id, &mut self.store, on_progress).await?;

            resolve_emails(
                self.api.as_ref(),
                &id,
                &logins,
                &mut self.store,
                summary,
                self.options.stop.as_deref(),
                on_progress,
            )
            .await?;
        }

        Ok(())
    }

    /// Defensive checkpoint before sleeping out a rate limit: re-flush both
    /// maps and snapshot them to backup files. Failures here are logged and
    /// swallowed; the pause itself must not be abandoned.
    fn checkpoint_before_pause(&self) {
        if let Err(e) = self.store.flush_all() {
            tracing::warn!(error = %e, "checkpoint flush before pause failed");
        }
        if let Err(e) = self.store.backup() {
            tracing::warn!(error = %e, "state backup before pause failed");
        }
    }

    fn stopping_or_exhausted(&self, summary: &HarvestSummary) -> bool {
        if self.stop_requested() {
            tracing::info!("stop requested, ending harvest");
            return true;
        }
        if let Some(max) = self.options.max_passes
            && summary.passes >= max
        {
            tracing::warn!(passes = summary.passes, "pass bound reached, ending harvest");
            return true;
        }
        false
    }
}
