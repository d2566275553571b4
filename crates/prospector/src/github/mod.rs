//! GitHub REST API integration: client, fetch trait, wire types, and errors.

mod client;
mod error;
mod types;

pub use client::{GitHubApi, GitHubClient};
pub use error::{GitHubError, short_error_message};
pub use types::Stargazer;
