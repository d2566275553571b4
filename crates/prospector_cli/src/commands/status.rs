//! `prospector status` - inspect checkpointed harvest state.

use std::error::Error;

use console::style;

use crate::config::Config;

use super::open_store;

/// Print per-repository load state and user-state tallies. Read-only.
pub fn handle_status(config: &Config) -> Result<(), Box<dyn Error>> {
    let store = open_store(config)?;

    if store.repositories().is_empty() {
        println!("No repositories tracked. Run `prospector init <owner/name>` first.");
        return Ok(());
    }

    println!("{}", style("Repositories").bold());
    for (id, repo) in store.repositories() {
        let state = if repo.loaded {
            style(format!("{} stargazers", repo.stargazers.len())).green()
        } else {
            style("not loaded".to_string()).yellow()
        };
        println!("  {}  {}", id, state);
    }

    let total = store.users().len();
    let found = store.users().values().filter(|r| r.is_some()).count();
    let sent = store
        .users()
        .values()
        .filter(|r| r.as_ref().is_some_and(|c| c.sent))
        .count();
    let unreachable = total - found;

    println!("{}", style("Users").bold());
    println!("  {} prospected", total);
    println!("  {} with a contact email ({} already contacted)", found, sent);
    println!("  {} unreachable", unreachable);

    Ok(())
}
