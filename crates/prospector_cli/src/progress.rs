//! Progress reporting for harvest runs.
//!
//! Two modes, auto-selected by TTY detection:
//! - Interactive mode (TTY): styled console lines, one per operation
//! - Logging mode (non-TTY): structured logging using tracing

mod interactive;
mod logging;

use std::sync::Arc;

use chrono::FixedOffset;
use console::Term;
use prospector::{HarvestProgress, ProgressCallback};

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Styled console output for a TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    ///
    /// `display_offset` shifts the rate-limit resume timestamp for human
    /// display; it has no effect in logging mode.
    pub fn new(display_offset: Option<FixedOffset>) -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new(display_offset))
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: HarvestProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| {
            reporter.handle(event);
        })
    }
}
