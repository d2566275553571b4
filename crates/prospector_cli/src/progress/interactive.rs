//! Styled console reporter for interactive (TTY) runs.

use std::io::Write;
use std::sync::Mutex;

use chrono::{DateTime, FixedOffset, Utc};
use console::style;
use prospector::HarvestProgress;

/// Prints one styled line per operation, with in-progress operations shown
/// as an open line that the outcome completes ("Loading ... DONE").
pub struct InteractiveReporter {
    display_offset: Option<FixedOffset>,
    /// Whether the current stdout line is an unterminated "Loading..." stub.
    line_open: Mutex<bool>,
}

impl InteractiveReporter {
    pub fn new(display_offset: Option<FixedOffset>) -> Self {
        Self {
            display_offset,
            line_open: Mutex::new(false),
        }
    }

    fn open_line(&self, text: String) {
        self.close_line();
        print!("{}", style(text).yellow().bold());
        let _ = std::io::stdout().flush();
        *self.line_open.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Finish the open line with an outcome.
    fn finish_line(&self, text: impl std::fmt::Display) {
        println!("{}", text);
        *self.line_open.lock().unwrap_or_else(|e| e.into_inner()) = false;
    }

    /// Terminate a dangling stub line, if any, without an outcome.
    fn close_line(&self) {
        let mut open = self.line_open.lock().unwrap_or_else(|e| e.into_inner());
        if *open {
            println!();
            *open = false;
        }
    }

    fn format_resume(&self, resume_at: DateTime<Utc>) -> String {
        match self.display_offset {
            Some(offset) => resume_at
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string(),
            None => resume_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }

    pub fn handle(&self, event: HarvestProgress) {
        match event {
            HarvestProgress::LoadingStargazers { id, page } => {
                self.open_line(format!(
                    "Loading stargazers for repository {} on page {}...",
                    id, page
                ));
            }

            HarvestProgress::StargazerPage { .. } => {
                self.finish_line(style(" DONE").green().bold());
            }

            HarvestProgress::PaginationStopped { error, .. } => {
                self.finish_line(style(format!(" ERROR: {}", error)).red().bold());
            }

            HarvestProgress::StargazersLoaded {
                id,
                total,
                from_cache,
            } => {
                if from_cache {
                    println!(
                        "{}",
                        style(format!(
                            "Reusing {} cached stargazers for repository {}",
                            total, id
                        ))
                        .green()
                        .bold()
                    );
                } else {
                    // The final (empty) page leaves a stub line behind.
                    self.close_line();
                }
            }

            HarvestProgress::ProspectingUser { login } => {
                self.open_line(format!("Loading email for user {}...", login));
            }

            HarvestProgress::EmailFound { email, .. } => {
                self.finish_line(style(format!(" DONE: {}", email)).green().bold());
            }

            HarvestProgress::EmailUnavailable { .. } => {
                self.finish_line(
                    style(" ERROR: Unable to find their email in their events")
                        .red()
                        .bold(),
                );
            }

            HarvestProgress::EmailExcluded { .. } => {
                self.finish_line(
                    style(" ERROR: Their email appears to be owned by GitHub")
                        .blue()
                        .bold(),
                );
            }

            HarvestProgress::UserPruned { .. } => {
                self.finish_line(style(" ERROR: This user does not exist").red().bold());
            }

            HarvestProgress::RateLimitPause { resume_at, .. } => {
                self.close_line();
                println!(
                    "{}",
                    style(format!(
                        "RETRYING ({}): The rate limit was reached",
                        self.format_resume(resume_at)
                    ))
                    .cyan()
                    .bold()
                );
            }

            HarvestProgress::PassFailed { error } => {
                self.finish_line(style(format!(" ERROR: {}", error)).red().bold());
                println!(
                    "{}",
                    style("RETRYING (now): An unknown error occurred")
                        .cyan()
                        .bold()
                );
            }

            _ => {}
        }
    }
}
