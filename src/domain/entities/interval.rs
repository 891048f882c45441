use std::net::Ipv4Addr;

use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};

/// The span during which the external IP address remained constant.
///
/// One interval corresponds to one logged record. While the interval is
/// still open, `last_seen_at` advances with every poll that observes the
/// same address; once the address changes, the interval is closed with
/// `last_seen_at` frozen at the final observation of the old address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeInterval {
    pub addr: Ipv4Addr,
    pub started_at: DateTime<Local>,
    pub last_seen_at: DateTime<Local>,
}

impl ChangeInterval {
    /// Opens a new interval: a freshly observed address has been held for
    /// exactly one observation.
    #[must_use]
    pub const fn opened(addr: Ipv4Addr, at: DateTime<Local>) -> Self {
        Self {
            addr,
            started_at: at,
            last_seen_at: at,
        }
    }

    /// How long the address has been observed so far.
    #[must_use]
    pub fn held_for(&self) -> TimeDelta {
        self.last_seen_at - self.started_at
    }
}
