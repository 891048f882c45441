use std::io::Write;

use super::format_row;
use crate::domain::entities::ChangeInterval;
use crate::domain::ports::journal::{IntervalJournal, JournalError};

/// Console record sink: the "log to standard output" mode.
///
/// Mirrors the CSV sink's one-row-per-interval contract with terminal
/// means: the open interval's row is redrawn in place with a carriage
/// return, and finalizing terminates the line so the record scrolls away.
#[derive(Debug, Default)]
pub struct StdoutJournal;

impl StdoutJournal {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IntervalJournal for StdoutJournal {
    fn update_current(&self, interval: &ChangeInterval) -> Result<(), JournalError> {
        let mut out = std::io::stdout().lock();
        write!(out, "\r{}", format_row(interval))
            .and_then(|()| out.flush())
            .map_err(|e| JournalError::WriteFailed(e.to_string()))
    }

    fn finalize_current(&self, interval: &ChangeInterval) -> Result<(), JournalError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "\r{}", format_row(interval))
            .and_then(|()| out.flush())
            .map_err(|e| JournalError::WriteFailed(e.to_string()))
    }
}
