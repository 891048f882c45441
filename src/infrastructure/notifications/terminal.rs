use std::io::Write;

use colored::Colorize;

use crate::domain::entities::ChangeInterval;
use crate::domain::ports::notifier::{ChangeNotifier, NotificationError};
use crate::domain::value_objects::Verbosity;

const STATUS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Console announcements, gated by the configured verbosity.
///
/// The per-poll status line is redrawn in place with a carriage return;
/// a change announcement first terminates that line so the old status
/// stays visible in the scrollback.
pub struct TerminalNotifier {
    verbosity: Verbosity,
}

impl TerminalNotifier {
    #[must_use]
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new(Verbosity::default())
    }
}

impl ChangeNotifier for TerminalNotifier {
    fn announce_start(
        &self,
        url: &str,
        interval_secs: u64,
        destination: &str,
    ) -> Result<(), NotificationError> {
        if !self.verbosity.shows_banner() {
            return Ok(());
        }
        println!("Logging IP address changes to {}", destination.bold());
        if self.verbosity.shows_status() {
            println!("Querying public IP from {url} every {interval_secs} seconds");
        }
        Ok(())
    }

    fn notify_observation(&self, interval: &ChangeInterval) -> Result<(), NotificationError> {
        if !self.verbosity.shows_status() {
            return Ok(());
        }
        let mut out = std::io::stdout().lock();
        write!(
            out,
            "\rExternal IP {} \u{2014} last observed at {}",
            interval.addr,
            interval.last_seen_at.format(STATUS_TIME_FORMAT)
        )
        .and_then(|()| out.flush())
        .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }

    fn notify_change(
        &self,
        closed: &ChangeInterval,
        opened: &ChangeInterval,
    ) -> Result<(), NotificationError> {
        if !self.verbosity.shows_status() {
            return Ok(());
        }
        // Terminate the in-place status line before announcing.
        println!();
        println!(
            "{} {} \u{2192} {} (previous address held since {})",
            "IP changed:".yellow().bold(),
            closed.addr,
            opened.addr,
            closed.started_at.format(STATUS_TIME_FORMAT)
        );
        Ok(())
    }

    fn notify_probe_failure(&self, reason: &str) -> Result<(), NotificationError> {
        // Failures go to stderr at every verbosity, as a line of their own.
        eprintln!("\n{reason}");
        Ok(())
    }
}
