//! `prospector init` - seed the repositories checkpoint file.

use std::error::Error;

use console::style;

use crate::config::Config;

use super::open_store;

/// Register repositories for harvesting. Already-tracked repositories are
/// left untouched so re-running init never resets harvested state.
pub fn handle_init(repositories: &[String], config: &Config) -> Result<(), Box<dyn Error>> {
    for id in repositories {
        let valid = match id.split_once('/') {
            Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
            None => false,
        };
        if !valid {
            return Err(format!("invalid repository identifier '{}', expected owner/name", id).into());
        }
    }

    let mut store = open_store(config)?;

    let mut added = 0usize;
    for id in repositories {
        if store.track_repository(id.clone()) {
            println!("{} {}", style("Tracking").green().bold(), id);
            added += 1;
        } else {
            println!("{} {}", style("Already tracked").yellow(), id);
        }
    }

    if added > 0 {
        store.save_repositories()?;
    }
    println!(
        "{}",
        style(format!("{} repositories tracked in total", store.repositories().len())).bold()
    );

    Ok(())
}
