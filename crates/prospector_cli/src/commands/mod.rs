//! Command handlers.

pub mod init;
pub mod run;
pub mod status;

use std::error::Error;
use std::fs;

use prospector::CheckpointStore;

use crate::config::Config;

/// Resolve the state file paths and load the checkpoint store, creating
/// parent directories as needed.
pub(crate) fn open_store(config: &Config) -> Result<CheckpointStore, Box<dyn Error>> {
    let files = config
        .state_files()
        .ok_or("could not determine the state directory")?;

    for path in [&files.repositories, &files.users] {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(CheckpointStore::load(files)?)
}
