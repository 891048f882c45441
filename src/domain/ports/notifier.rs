use thiserror::Error;

use crate::domain::entities::ChangeInterval;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// Announcement channel, distinct from the journal: status lines on the
/// console, webhook calls on change. Notification failures never stop the
/// poll loop.
pub trait ChangeNotifier: Send + Sync {
    /// Announce the start of a watch session.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the announcement fails to send.
    fn announce_start(
        &self,
        url: &str,
        interval_secs: u64,
        destination: &str,
    ) -> Result<(), NotificationError>;

    /// Report a successful poll of the interval still in progress.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the announcement fails to send.
    fn notify_observation(&self, interval: &ChangeInterval) -> Result<(), NotificationError>;

    /// Report that the external address changed.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the announcement fails to send.
    fn notify_change(
        &self,
        closed: &ChangeInterval,
        opened: &ChangeInterval,
    ) -> Result<(), NotificationError>;

    /// Report a failed poll; the loop continues regardless.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the announcement fails to send.
    fn notify_probe_failure(&self, reason: &str) -> Result<(), NotificationError>;
}
