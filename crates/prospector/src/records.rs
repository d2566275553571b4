//! Checkpointed record types for repositories and users.
//!
//! Both maps are persisted as whole-map JSON objects. A user keyed in the map
//! with a `null` value was prospected and found unreachable; a user absent
//! from the map has never been attempted. This distinction is what makes every
//! state transition one-directional: a login is fetched at most once, ever.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tracked repository and its harvested stargazer snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// True once the stargazer list has been paginated to completion.
    /// A loaded repository is never re-paginated.
    pub loaded: bool,
    /// Stargazer logins in page order. Pruned in place when a login turns
    /// out to reference a deleted or renamed account.
    pub stargazers: Vec<String>,
}

impl Repository {
    /// An empty, not-yet-loaded repository record (the bootstrap state).
    pub fn new() -> Self {
        Self::default()
    }
}

/// A discovered contact address and its outreach status.
///
/// `sent` is owned by the downstream notifier; the harvesting engine persists
/// it but never flips it in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub sent: bool,
}

impl Contact {
    /// A freshly discovered contact, not yet dispatched.
    pub fn found(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            sent: false,
        }
    }
}

/// Terminal prospecting state for a login.
///
/// `None` means the login was attempted and no usable email was found
/// (serialized as JSON `null`). A login that was never attempted is simply
/// absent from the [`UserMap`].
pub type UserRecord = Option<Contact>;

/// Repositories keyed by `owner/name` identifier.
///
/// `BTreeMap` gives the deterministic iteration order the resume semantics
/// rely on: every pass visits repositories (and their logins) in the same
/// order across restarts.
pub type RepositoryMap = BTreeMap<String, Repository>;

/// Users keyed by login.
pub type UserMap = BTreeMap<String, UserRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_repository_is_unloaded_and_empty() {
        let repo = Repository::new();
        assert!(!repo.loaded);
        assert!(repo.stargazers.is_empty());
    }

    #[test]
    fn contact_found_starts_unsent() {
        let contact = Contact::found("a@b.com");
        assert_eq!(contact.email, "a@b.com");
        assert!(!contact.sent);
    }

    #[test]
    fn user_map_serializes_unreachable_as_null() {
        let mut users = UserMap::new();
        users.insert("ghost".to_string(), None);
        users.insert("alice".to_string(), Some(Contact::found("a@b.com")));

        let json = serde_json::to_string(&users).unwrap();
        assert_eq!(
            json,
            r#"{"alice":{"email":"a@b.com","sent":false},"ghost":null}"#
        );
    }

    #[test]
    fn user_map_round_trips_through_json() {
        let json = r#"{"alice":{"email":"a@b.com","sent":true},"ghost":null}"#;
        let users: UserMap = serde_json::from_str(json).unwrap();

        assert_eq!(
            users.get("alice"),
            Some(&Some(Contact {
                email: "a@b.com".to_string(),
                sent: true,
            }))
        );
        assert_eq!(users.get("ghost"), Some(&None));
        assert_eq!(users.get("unknown"), None);
    }

    #[test]
    fn repository_map_round_trips_through_json() {
        let mut repos = RepositoryMap::new();
        repos.insert(
            "owner/repo".to_string(),
            Repository {
                loaded: true,
                stargazers: vec!["alice".to_string(), "bob".to_string()],
            },
        );

        let json = serde_json::to_string(&repos).unwrap();
        let parsed: RepositoryMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, repos);
    }
}
