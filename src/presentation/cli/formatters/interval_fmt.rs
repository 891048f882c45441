use chrono::TimeDelta;
use colored::Colorize;

use crate::domain::entities::ChangeInterval;

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prints a cyan section title with a dimmed underline.
pub fn print_section_header(title: &str) {
    println!("\n{}", title.cyan().bold());
    println!("{}", "\u{2500}".repeat(title.len()).dimmed());
}

/// Formats recorded intervals as an aligned table.
///
/// # Returns
///
/// A multi-line string with header, separator, and one row per interval.
#[must_use]
pub fn format_interval_table(intervals: &[ChangeInterval]) -> String {
    let header = format!(
        "{:<16} {:<20} {:<20} {:>12}",
        "ADDRESS", "FIRST SEEN", "LAST SEEN", "HELD"
    );
    let separator = "\u{2500}".repeat(header.len());

    let mut rows = vec![header, separator];

    for interval in intervals {
        rows.push(format!(
            "{:<16} {:<20} {:<20} {:>12}",
            interval.addr.to_string(),
            interval.started_at.format(DISPLAY_TIME_FORMAT),
            interval.last_seen_at.format(DISPLAY_TIME_FORMAT),
            format_held(interval.held_for())
        ));
    }

    rows.join("\n")
}

/// Formats a hold duration as `HH:MM:SS`, with a day count once it
/// exceeds 24 hours.
#[must_use]
pub fn format_held(delta: TimeDelta) -> String {
    let secs = delta.num_seconds().max(0);
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (hours, minutes, seconds) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}
