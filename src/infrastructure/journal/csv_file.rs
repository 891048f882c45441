use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDateTime};

use super::{CSV_HEADER, TIME_FORMAT, format_row};
use crate::domain::entities::ChangeInterval;
use crate::domain::ports::journal::{IntervalJournal, JournalError};

/// CSV file sink with in-place rewrite of the open interval's row.
///
/// The byte offset of the current row is retained across writes:
/// `update_current` seeks back to it before writing, so the open interval
/// occupies a single row that keeps its `end_time` column fresh;
/// `finalize_current` writes the row and moves the offset past it. Every
/// write is flushed, so even after a crash the open interval is already
/// on disk.
///
/// Within one interval all rewrites have identical length (fixed-width
/// timestamps, constant address), so seeking without truncation never
/// leaves stale bytes behind.
pub struct CsvJournal {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    file: File,
    row_start: u64,
}

impl CsvJournal {
    /// Creates `<prefix>_<yyyymmdd_hhmmss>.csv` under `directory` (tilde
    /// expanded, created if missing) and writes the header.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::WriteFailed` if the directory or file cannot
    /// be created or the header cannot be written.
    pub fn create(
        directory: &str,
        prefix: &str,
        started_at: DateTime<Local>,
    ) -> Result<Self, JournalError> {
        let expanded = shellexpand::tilde(directory);
        let dir = PathBuf::from(expanded.as_ref());
        std::fs::create_dir_all(&dir)
            .map_err(|e| JournalError::WriteFailed(format!("cannot create {}: {e}", dir.display())))?;

        let filename = format!("{prefix}_{}.csv", started_at.format(TIME_FORMAT));
        let path = dir.join(filename);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| JournalError::WriteFailed(format!("cannot create {}: {e}", path.display())))?;

        writeln!(file, "{CSV_HEADER}")
            .and_then(|()| file.flush())
            .map_err(|e| JournalError::WriteFailed(format!("cannot write header: {e}")))?;
        let row_start = file
            .stream_position()
            .map_err(|e| JournalError::WriteFailed(e.to_string()))?;

        Ok(Self {
            path,
            inner: Mutex::new(Inner { file, row_start }),
        })
    }

    /// The file this journal writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seek to the current row, write it, flush, and report the stream
    /// position after the row.
    fn write_row(inner: &mut Inner, interval: &ChangeInterval) -> std::io::Result<u64> {
        inner.file.seek(SeekFrom::Start(inner.row_start))?;
        writeln!(inner.file, "{}", format_row(interval))?;
        inner.file.flush()?;
        inner.file.stream_position()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, JournalError> {
        self.inner
            .lock()
            .map_err(|_| JournalError::WriteFailed("journal lock poisoned".to_string()))
    }

    /// Parses a journal file back into its recorded intervals.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::ReadFailed` if the file cannot be read, or
    /// `JournalError::Malformed` if the header or any row is not in the
    /// expected format.
    pub fn read_intervals(path: &Path) -> Result<Vec<ChangeInterval>, JournalError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| JournalError::ReadFailed(format!("{}: {e}", path.display())))?;

        let mut lines = content.lines();
        match lines.next() {
            Some(header) if header == CSV_HEADER => {}
            Some(other) => {
                return Err(JournalError::Malformed(format!(
                    "unexpected header {other:?}"
                )));
            }
            None => return Err(JournalError::Malformed("empty file".to_string())),
        }

        lines
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_row(line).map_err(|reason| {
                // Header is line 1, first record line 2.
                JournalError::Malformed(format!("line {}: {reason}", idx + 2))
            }))
            .collect()
    }
}

fn parse_row(line: &str) -> Result<ChangeInterval, String> {
    let mut fields = line.split(',');
    let (Some(addr), Some(start), Some(end), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(format!("expected 3 fields in {line:?}"));
    };

    let addr: Ipv4Addr = addr
        .trim()
        .parse()
        .map_err(|_| format!("invalid address {addr:?}"))?;
    Ok(ChangeInterval {
        addr,
        started_at: parse_timestamp(start)?,
        last_seen_at: parse_timestamp(end)?,
    })
}

fn parse_timestamp(field: &str) -> Result<DateTime<Local>, String> {
    let naive = NaiveDateTime::parse_from_str(field.trim(), TIME_FORMAT)
        .map_err(|_| format!("invalid timestamp {field:?}"))?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| format!("timestamp {field:?} does not exist in the local timezone"))
}

impl IntervalJournal for CsvJournal {
    fn update_current(&self, interval: &ChangeInterval) -> Result<(), JournalError> {
        let mut inner = self.lock()?;
        Self::write_row(&mut inner, interval)
            .map(|_| ())
            .map_err(|e| JournalError::WriteFailed(format!("{}: {e}", self.path.display())))
    }

    fn finalize_current(&self, interval: &ChangeInterval) -> Result<(), JournalError> {
        let mut inner = self.lock()?;
        let end = Self::write_row(&mut inner, interval)
            .map_err(|e| JournalError::WriteFailed(format!("{}: {e}", self.path.display())))?;
        inner.row_start = end;
        Ok(())
    }
}
