use std::net::Ipv4Addr;

use chrono::{DateTime, Local};

use crate::domain::entities::ChangeInterval;

/// Outcome of feeding one successful poll to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpTransition {
    /// First successful poll; the first interval opens.
    Initial(ChangeInterval),
    /// Same address as the previous poll; the open interval extends.
    Unchanged(ChangeInterval),
    /// The address differs from the previous poll. `closed` ends at the
    /// last observation of the old address, `opened` starts now.
    Changed {
        closed: ChangeInterval,
        opened: ChangeInterval,
    },
}

/// Change-detection state machine over successive IP observations.
///
/// Pure state, no I/O. Failed polls must not be fed to the tracker: they
/// neither advance nor close the open interval.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    current: Option<ChangeInterval>,
}

impl ChangeTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The interval currently in progress, if any poll has succeeded yet.
    #[must_use]
    pub const fn current(&self) -> Option<&ChangeInterval> {
        self.current.as_ref()
    }

    /// Feeds one observation and reports the resulting transition.
    pub fn observe(&mut self, addr: Ipv4Addr, at: DateTime<Local>) -> IpTransition {
        match self.current.take() {
            None => {
                let opened = ChangeInterval::opened(addr, at);
                self.current = Some(opened.clone());
                IpTransition::Initial(opened)
            }
            Some(mut open) if open.addr == addr => {
                open.last_seen_at = at;
                self.current = Some(open.clone());
                IpTransition::Unchanged(open)
            }
            Some(closed) => {
                let opened = ChangeInterval::opened(addr, at);
                self.current = Some(opened.clone());
                IpTransition::Changed { closed, opened }
            }
        }
    }
}
