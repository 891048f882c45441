use thiserror::Error;

use crate::domain::entities::ChangeInterval;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("journal write failed: {0}")]
    WriteFailed(String),
    #[error("journal read failed: {0}")]
    ReadFailed(String),
    #[error("malformed journal: {0}")]
    Malformed(String),
}

/// Sink for change-interval records.
///
/// The sink keeps exactly one row per interval: while an interval is open,
/// successive `update_current` calls overwrite the same row so the record
/// always shows the latest `last_seen_at`. `finalize_current` writes the
/// row one last time and advances, so the next `update_current` starts a
/// fresh row.
pub trait IntervalJournal: Send + Sync {
    /// (Re)write the row for the interval still in progress.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` if the write fails.
    fn update_current(&self, interval: &ChangeInterval) -> Result<(), JournalError>;

    /// Write the interval's row one final time and advance past it.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` if the write fails.
    fn finalize_current(&self, interval: &ChangeInterval) -> Result<(), JournalError>;
}
