use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::domain::entities::ChangeInterval;
use crate::infrastructure::journal::CsvJournal;
use crate::presentation::cli::formatters::interval_fmt::{
    format_held, format_interval_table, print_section_header,
};

#[derive(Serialize)]
struct ReportOutput<'a> {
    file: String,
    total_intervals: usize,
    distinct_addresses: usize,
    changes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    longest_held: Option<LongestHeld>,
    intervals: &'a [ChangeInterval],
}

#[derive(Serialize)]
struct LongestHeld {
    addr: Ipv4Addr,
    held_secs: i64,
}

/// Summarizes the intervals recorded in a journal file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a journal, or
/// JSON serialization fails.
pub fn run_report(file: &Path, json: bool) -> anyhow::Result<()> {
    let intervals = CsvJournal::read_intervals(file)
        .map_err(|e| anyhow::anyhow!("failed to read journal: {e}"))?;

    let distinct = distinct_addresses(&intervals);
    // Each row after the first exists because the address changed.
    let changes = intervals.len().saturating_sub(1);
    let longest = longest_held(&intervals);

    if json {
        let output = ReportOutput {
            file: file.display().to_string(),
            total_intervals: intervals.len(),
            distinct_addresses: distinct,
            changes,
            longest_held: longest.map(|i| LongestHeld {
                addr: i.addr,
                held_secs: i.held_for().num_seconds(),
            }),
            intervals: &intervals,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_section_header(&format!("Journal {}", file.display()));
    if intervals.is_empty() {
        println!("No intervals recorded yet.");
        return Ok(());
    }

    println!("{}", format_interval_table(&intervals));

    print_section_header("Summary");
    println!("Intervals:          {}", intervals.len());
    println!("Distinct addresses: {distinct}");
    println!("Address changes:    {changes}");
    if let Some(interval) = longest {
        println!(
            "Longest held:       {} ({})",
            interval.addr.to_string().bold(),
            format_held(interval.held_for())
        );
    }

    Ok(())
}

fn distinct_addresses(intervals: &[ChangeInterval]) -> usize {
    intervals
        .iter()
        .map(|i| i.addr)
        .collect::<HashSet<_>>()
        .len()
}

fn longest_held(intervals: &[ChangeInterval]) -> Option<&ChangeInterval> {
    intervals.iter().max_by_key(|i| i.held_for())
}
