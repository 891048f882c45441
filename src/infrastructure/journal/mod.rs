pub mod csv_file;
pub mod stdout;

pub use csv_file::CsvJournal;
pub use stdout::StdoutJournal;

use crate::domain::entities::ChangeInterval;

/// Timestamp format used in records, inherited from the tool's file naming:
/// `yyyymmdd_hhmmss`.
pub const TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

pub(crate) const CSV_HEADER: &str = "ip_address,start_time,end_time";

pub(crate) fn format_row(interval: &ChangeInterval) -> String {
    format!(
        "{},{},{}",
        interval.addr,
        interval.started_at.format(TIME_FORMAT),
        interval.last_seen_at.format(TIME_FORMAT)
    )
}
