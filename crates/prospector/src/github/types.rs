//! Wire types decoded from GitHub API responses.

use serde::Deserialize;

/// A single entry from a repository's stargazer listing.
///
/// The listing returns full user objects; only the login is relevant here,
/// so everything else is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stargazer {
    pub login: String,
}
