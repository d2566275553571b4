//! Prospector - a resumable stargazer contact-harvesting engine.
//!
//! For a configured set of GitHub repositories, this library harvests the
//! users who starred them and mines each user's public event feed for a
//! contactable email address. All progress is checkpointed to two whole-map
//! JSON files after every state transition, so a crash or a rate limit
//! interrupts nothing: the next pass skips settled work and picks up exactly
//! where the previous one stopped, and no user is ever prospected twice.
//!
//! The engine is strictly sequential by design. The rate limit is a shared
//! global budget, and one outstanding request at a time keeps its accounting
//! trivial.

pub mod email;
pub mod github;
pub mod harvest;
pub mod records;
pub mod store;

pub use email::Outcome;
pub use github::{GitHubApi, GitHubClient, GitHubError, Stargazer};
pub use harvest::{
    HarvestError, HarvestOptions, HarvestProgress, HarvestSummary, Harvester, ProgressCallback,
    emit,
};
pub use records::{Contact, Repository, RepositoryMap, UserMap, UserRecord};
pub use store::{CheckpointStore, StateFiles, StoreError};
