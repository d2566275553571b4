//! Per-login email prospecting with at-most-once resolution.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::email::{self, Outcome};
use crate::github::{GitHubApi, GitHubError};
use crate::records::Contact;
use crate::store::CheckpointStore;

use super::error::HarvestError;
use super::progress::{HarvestProgress, ProgressCallback, emit};
use super::types::HarvestSummary;

/// Resolve contact emails for a repository's stargazer logins, in order.
///
/// Logins that already have a user record (in any state) are skipped with no
/// network activity, which is what makes restarting a pass cheap. Each
/// resolved login's terminal state is flushed before moving to the next, so
/// an interruption loses at most the in-flight login, which is re-attempted
/// on resume.
///
/// A login whose account no longer exists is pruned from the repository's
/// stargazer snapshot instead of being recorded.
pub async fn resolve_emails(
    api: &dyn GitHubApi,
    id: &str,
    logins: &[String],
    store: &mut CheckpointStore,
    summary: &mut HarvestSummary,
    stop: Option<&AtomicBool>,
    on_progress: Option<&ProgressCallback>,
) -> Result<(), HarvestError> {
    for login in logins {
        if stop.is_some_and(|flag| flag.load(Ordering::Acquire)) {
            break;
        }
        if store.users().contains_key(login) {
            continue;
        }

        emit(
            on_progress,
            HarvestProgress::ProspectingUser {
                login: login.clone(),
            },
        );

        match api.user_events(login).await {
            Ok(feed) => {
                match email::classify(&feed) {
                    Outcome::Valid(found) => {
                        store.settle_user(login.clone(), Some(Contact::found(found.clone())));
                        store.save_users()?;
                        summary.found += 1;
                        emit(
                            on_progress,
                            HarvestProgress::EmailFound {
                                login: login.clone(),
                                email: found,
                            },
                        );
                    }
                    Outcome::Excluded => {
                        store.settle_user(login.clone(), None);
                        store.save_users()?;
                        summary.unreachable += 1;
                        emit(
                            on_progress,
                            HarvestProgress::EmailExcluded {
                                login: login.clone(),
                            },
                        );
                    }
                    Outcome::NoMatch => {
                        store.settle_user(login.clone(), None);
                        store.save_users()?;
                        summary.unreachable += 1;
                        emit(
                            on_progress,
                            HarvestProgress::EmailUnavailable {
                                login: login.clone(),
                            },
                        );
                    }
                }
            }
            Err(GitHubError::NotFound { .. }) => {
                // The account was deleted or renamed since the stargazer
                // list was harvested. No user record: the login never
                // existed as far as the users map is concerned.
                if let Some(repo) = store.repositories_mut().get_mut(id) {
                    repo.stargazers.retain(|other| other != login);
                }
                store.save_repositories()?;
                summary.pruned += 1;
                emit(
                    on_progress,
                    HarvestProgress::UserPruned {
                        id: id.to_string(),
                        login: login.clone(),
                    },
                );
            }
            // No record was written, so the login is re-attempted on resume.
            Err(e) if e.is_rate_limited() => return Err(HarvestError::RateLimited),
            Err(e) => return Err(HarvestError::Api(e)),
        }
    }

    Ok(())
}
