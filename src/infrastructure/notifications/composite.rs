use crate::domain::entities::ChangeInterval;
use crate::domain::ports::notifier::{ChangeNotifier, NotificationError};

/// Forwards notifications to multiple notifiers.
///
/// Calls each notifier in order, collecting errors.
/// Returns the first error encountered (if any), but always calls all notifiers.
pub struct CompositeNotifier {
    notifiers: Vec<Box<dyn ChangeNotifier>>,
}

impl CompositeNotifier {
    #[must_use]
    pub fn new(notifiers: Vec<Box<dyn ChangeNotifier>>) -> Self {
        Self { notifiers }
    }

    fn fan_out<F>(&self, mut call: F) -> Result<(), NotificationError>
    where
        F: FnMut(&dyn ChangeNotifier) -> Result<(), NotificationError>,
    {
        let mut first_error = None;
        for notifier in &self.notifiers {
            if let Err(e) = call(notifier.as_ref()) {
                tracing::warn!("Notification failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for CompositeNotifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ChangeNotifier for CompositeNotifier {
    fn announce_start(
        &self,
        url: &str,
        interval_secs: u64,
        destination: &str,
    ) -> Result<(), NotificationError> {
        self.fan_out(|n| n.announce_start(url, interval_secs, destination))
    }

    fn notify_observation(&self, interval: &ChangeInterval) -> Result<(), NotificationError> {
        self.fan_out(|n| n.notify_observation(interval))
    }

    fn notify_change(
        &self,
        closed: &ChangeInterval,
        opened: &ChangeInterval,
    ) -> Result<(), NotificationError> {
        self.fan_out(|n| n.notify_change(closed, opened))
    }

    fn notify_probe_failure(&self, reason: &str) -> Result<(), NotificationError> {
        self.fan_out(|n| n.notify_probe_failure(reason))
    }
}
