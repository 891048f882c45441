use std::time::Duration;

use serde_json::{Value, json};
use tracing::warn;

use crate::domain::entities::ChangeInterval;
use crate::domain::ports::notifier::{ChangeNotifier, NotificationError};

/// Posts a JSON payload to an HTTP endpoint when the external IP changes.
///
/// Only changes are dispatched; per-poll observations and probe failures
/// stay local. All HTTP errors are logged but never propagated, so a
/// failing webhook cannot stall the poll loop.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Creates a notifier targeting the given URL. The HTTP client uses a
    /// 5-second timeout covering DNS resolution, connection, and response.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::ChannelUnavailable` if the HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(url: String) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                NotificationError::ChannelUnavailable(format!("cannot build HTTP client: {e}"))
            })?;

        Ok(Self { url, client })
    }

    /// Sends a JSON payload to the webhook URL. Best-effort: errors are
    /// logged and swallowed.
    fn send_payload(&self, payload: &Value) {
        let result = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(self.client.post(&self.url).json(payload).send())
        });

        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => warn!("Webhook HTTP {}", resp.status()),
            Err(e) => warn!("Webhook error: {e}"),
        }
    }

    fn format_change(closed: &ChangeInterval, opened: &ChangeInterval) -> Value {
        json!({
            "source": "ipwatch",
            "event": "ip_changed",
            "previous_ip": closed.addr.to_string(),
            "previous_since": closed.started_at.to_rfc3339(),
            "previous_until": closed.last_seen_at.to_rfc3339(),
            "new_ip": opened.addr.to_string(),
            "observed_at": opened.started_at.to_rfc3339(),
        })
    }
}

impl ChangeNotifier for WebhookNotifier {
    fn announce_start(
        &self,
        _url: &str,
        _interval_secs: u64,
        _destination: &str,
    ) -> Result<(), NotificationError> {
        Ok(())
    }

    fn notify_observation(&self, _interval: &ChangeInterval) -> Result<(), NotificationError> {
        Ok(())
    }

    fn notify_change(
        &self,
        closed: &ChangeInterval,
        opened: &ChangeInterval,
    ) -> Result<(), NotificationError> {
        let payload = Self::format_change(closed, opened);
        self.send_payload(&payload);
        Ok(())
    }

    fn notify_probe_failure(&self, _reason: &str) -> Result<(), NotificationError> {
        Ok(())
    }
}
