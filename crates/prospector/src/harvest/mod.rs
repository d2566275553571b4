//! The resumable harvest engine.
//!
//! # Module Structure
//!
//! - [`types`] - `HarvestOptions`, `HarvestSummary`, constants
//! - [`progress`] - `HarvestProgress`, `ProgressCallback`, `emit()`
//! - [`paginator`] - stargazer pagination with idempotent re-entry
//! - [`prospector`] - per-login email resolution
//! - [`engine`] - the retry orchestrator, [`engine::Harvester`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use prospector::{CheckpointStore, GitHubClient, Harvester, HarvestOptions, StateFiles};
//!
//! let store = CheckpointStore::load(StateFiles::under(state_dir))?;
//! let api = Arc::new(GitHubClient::new(token));
//! let mut harvester = Harvester::new(api, store, HarvestOptions::default());
//! let summary = harvester.run(None).await;
//! println!("found {} contacts", summary.found);
//! ```

pub mod engine;
mod error;
mod paginator;
mod progress;
mod prospector;
mod types;

pub use engine::Harvester;
pub use error::HarvestError;
pub use paginator::fetch_stargazers;
pub use progress::{HarvestProgress, ProgressCallback, emit};
pub use prospector::resolve_emails;
pub use types::{DEFAULT_RETRY_DELAY, HarvestOptions, HarvestSummary};
