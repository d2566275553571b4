//! Stargazer pagination with idempotent re-entry.

use crate::github::GitHubApi;
use crate::store::CheckpointStore;

use super::error::HarvestError;
use super::progress::{HarvestProgress, ProgressCallback, emit};

/// Fetch the full stargazer login list for one repository.
///
/// If the repository is already marked loaded, the cached snapshot is
/// returned without any network activity. Otherwise pages are walked from 1
/// until an empty page ends the listing. Pagination is strictly sequential:
/// one outstanding request at a time.
///
/// A non-rate-limit fetch error ends pagination early and the accumulated
/// prefix is kept as the (now loaded) snapshot. A rate limit aborts the
/// whole attempt without marking the repository loaded, so the next pass
/// restarts from page 1.
pub async fn fetch_stargazers(
    api: &dyn GitHubApi,
    id: &str,
    store: &mut CheckpointStore,
    on_progress: Option<&ProgressCallback>,
) -> Result<Vec<String>, HarvestError> {
    if let Some(repo) = store.repositories().get(id)
        && repo.loaded
    {
        let stargazers = repo.stargazers.clone();
        emit(
            on_progress,
            HarvestProgress::StargazersLoaded {
                id: id.to_string(),
                total: stargazers.len(),
                from_cache: true,
            },
        );
        return Ok(stargazers);
    }

    let mut stargazers: Vec<String> = Vec::new();
    let mut page = 1u32;

    loop {
        emit(
            on_progress,
            HarvestProgress::LoadingStargazers {
                id: id.to_string(),
                page,
            },
        );

        match api.stargazer_page(id, page).await {
            Ok(chunk) => {
                if chunk.is_empty() {
                    break;
                }
                let count = chunk.len();
                stargazers.extend(chunk.into_iter().map(|s| s.login));
                emit(
                    on_progress,
                    HarvestProgress::StargazerPage {
                        id: id.to_string(),
                        page,
                        count,
                        total_so_far: stargazers.len(),
                    },
                );
                page += 1;
            }
            Err(e) if e.is_rate_limited() => return Err(HarvestError::RateLimited),
            Err(e) => {
                // Keep whatever was accumulated and treat the listing as
                // complete. Partial snapshots are settled rather than
                // retried.
                tracing::warn!(repository = %id, page, error = %e, "pagination stopped early");
                emit(
                    on_progress,
                    HarvestProgress::PaginationStopped {
                        id: id.to_string(),
                        page,
                        error: e.to_string(),
                    },
                );
                break;
            }
        }
    }

    let repo = store.repositories_mut().entry(id.to_string()).or_default();
    repo.loaded = true;
    repo.stargazers = stargazers.clone();
    store.save_repositories()?;

    emit(
        on_progress,
        HarvestProgress::StargazersLoaded {
            id: id.to_string(),
            total: stargazers.len(),
            from_cache: false,
        },
    );

    Ok(stargazers)
}
