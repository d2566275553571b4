//! Shared harvest types and constants.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Default delay before resuming after a rate limit signal.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Options for a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Fixed delay slept after a rate limit before restarting the pass.
    pub retry_delay: Duration,
    /// Upper bound on restart passes. `None` (the default) retries forever,
    /// which is the documented behavior for a supervised batch job.
    pub max_passes: Option<u32>,
    /// Cooperative stop flag, checked between operations (never mid-fetch).
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
            max_passes: None,
            stop: None,
        }
    }
}

/// Accumulated result of a harvest run.
#[derive(Debug, Clone, Default)]
pub struct HarvestSummary {
    /// Number of passes over the repository list, including restarts.
    pub passes: u32,
    /// Rate-limit pauses taken.
    pub rate_limit_pauses: u32,
    /// Immediate retries after unclassified errors.
    pub immediate_retries: u32,
    /// Users newly resolved to a contact address.
    pub found: usize,
    /// Users newly settled as unreachable.
    pub unreachable: usize,
    /// Stale logins pruned from repository snapshots.
    pub pruned: usize,
    /// True when a full pass completed; false when the run was stopped
    /// early (stop flag or pass bound).
    pub completed: bool,
}
