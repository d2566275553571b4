//! `prospector run` - drive the harvest loop.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use console::{Term, style};
use prospector::{GitHubApi, GitHubClient, HarvestOptions, HarvestSummary, Harvester};

use crate::config::Config;
use crate::progress::ProgressReporter;
use crate::shutdown;

use super::open_store;

/// CLI overrides for a harvest run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Run a single pass instead of retrying forever.
    pub once: bool,
    /// Bound the number of restart passes.
    pub max_passes: Option<u32>,
    /// Override the configured rate-limit retry delay (seconds).
    pub retry_delay_secs: Option<u64>,
}

pub async fn handle_run(options: RunOptions, config: &Config) -> Result<(), Box<dyn Error>> {
    let token = config.github_token().ok_or(
        "GitHub token not configured (set PROSPECTOR_GITHUB_TOKEN or [github] token in config)",
    )?;

    let store = open_store(config)?;
    if store.repositories().is_empty() {
        println!("No repositories tracked. Run `prospector init <owner/name>` first.");
        return Ok(());
    }

    let api: Arc<dyn GitHubApi> = Arc::new(GitHubClient::new(token));

    let retry_delay = options
        .retry_delay_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.retry_delay());
    let max_passes = if options.once {
        Some(1)
    } else {
        options.max_passes
    };

    let harvest_options = HarvestOptions {
        retry_delay,
        max_passes,
        stop: Some(shutdown::stop_flag()),
    };

    let reporter = Arc::new(ProgressReporter::new(config.display_offset()));
    let callback = reporter.as_callback();

    let mut harvester = Harvester::new(api, store, harvest_options);
    let summary = harvester.run(Some(&callback)).await;

    report_summary(&summary);
    Ok(())
}

fn report_summary(summary: &HarvestSummary) {
    if Term::stdout().is_term() {
        let headline = if summary.completed {
            style("Harvest complete").green().bold()
        } else {
            style("Harvest stopped").yellow().bold()
        };
        println!(
            "{}: {} found, {} unreachable, {} pruned ({} passes, {} rate-limit pauses)",
            headline,
            summary.found,
            summary.unreachable,
            summary.pruned,
            summary.passes,
            summary.rate_limit_pauses,
        );
    } else {
        tracing::info!(
            completed = summary.completed,
            found = summary.found,
            unreachable = summary.unreachable,
            pruned = summary.pruned,
            passes = summary.passes,
            rate_limit_pauses = summary.rate_limit_pauses,
            "Harvest finished"
        );
    }
}
