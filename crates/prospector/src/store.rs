//! Durable checkpoint store for the repository and user maps.
//!
//! Both maps are flushed in full, synchronously, immediately after every
//! mutation that must survive a crash. Writes go through a temp-file-then-
//! rename so an interrupted flush can never leave a truncated state file
//! behind; the worst case after a crash is losing the single most recent
//! record transition.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::records::{Repository, RepositoryMap, UserMap, UserRecord};

/// Errors from reading or writing the checkpoint files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read state file {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write state file {}: {}", .path.display(), .source)]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed state file {}: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Locations of the two on-disk state files.
#[derive(Debug, Clone)]
pub struct StateFiles {
    pub repositories: PathBuf,
    pub users: PathBuf,
}

impl StateFiles {
    pub fn new(repositories: impl Into<PathBuf>, users: impl Into<PathBuf>) -> Self {
        Self {
            repositories: repositories.into(),
            users: users.into(),
        }
    }

    /// The conventional pair of file names under a state directory.
    pub fn under(dir: &Path) -> Self {
        Self {
            repositories: dir.join("repositories.json"),
            users: dir.join("users.json"),
        }
    }
}

/// Owner of the two in-memory maps and their durable snapshots.
///
/// All components receive this store explicitly; there is no ambient global
/// state. Load once at startup, flush after every mutation.
#[derive(Debug)]
pub struct CheckpointStore {
    files: StateFiles,
    repositories: RepositoryMap,
    users: UserMap,
}

impl CheckpointStore {
    /// Load both maps from disk. Missing files yield empty maps so a fresh
    /// working directory bootstraps cleanly.
    pub fn load(files: StateFiles) -> Result<Self, StoreError> {
        let repositories = read_map(&files.repositories)?;
        let users = read_map(&files.users)?;
        Ok(Self {
            files,
            repositories,
            users,
        })
    }

    pub fn repositories(&self) -> &RepositoryMap {
        &self.repositories
    }

    pub fn repositories_mut(&mut self) -> &mut RepositoryMap {
        &mut self.repositories
    }

    pub fn users(&self) -> &UserMap {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UserMap {
        &mut self.users
    }

    /// Register a repository for harvesting if it is not already tracked.
    /// Existing records are left untouched.
    pub fn track_repository(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.repositories.contains_key(&id) {
            return false;
        }
        self.repositories.insert(id, Repository::new());
        true
    }

    /// Record a user's terminal prospecting state. Never overwrites: once a
    /// login is settled its record (including the externally owned `sent`
    /// flag) is immutable.
    pub fn settle_user(&mut self, login: impl Into<String>, record: UserRecord) {
        self.users.entry(login.into()).or_insert(record);
    }

    /// Flush the full repositories map to disk.
    pub fn save_repositories(&self) -> Result<(), StoreError> {
        write_map(&self.files.repositories, &self.repositories)
    }

    /// Flush the full users map to disk.
    pub fn save_users(&self) -> Result<(), StoreError> {
        write_map(&self.files.users, &self.users)
    }

    /// Flush both maps. Used as the defensive checkpoint before a
    /// rate-limit pause.
    pub fn flush_all(&self) -> Result<(), StoreError> {
        self.save_repositories()?;
        self.save_users()
    }

    /// Copy both state files to `.bak` siblings.
    pub fn backup(&self) -> Result<(), StoreError> {
        for path in [&self.files.repositories, &self.files.users] {
            if path.exists() {
                let backup = backup_path(path);
                fs::copy(path, &backup).map_err(|source| StoreError::Write {
                    path: backup,
                    source,
                })?;
            }
        }
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

fn read_map<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_map<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    // Write to a temp sibling then rename into place.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| StoreError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
