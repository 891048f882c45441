use std::net::Ipv4Addr;

use chrono::Local;

use crate::domain::ports::journal::IntervalJournal;
use crate::domain::ports::notifier::ChangeNotifier;
use crate::domain::ports::probe::IpProbe;
use crate::domain::tracker::{ChangeTracker, IpTransition};

/// What a single poll cycle concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The probe failed; the tracker and the journal were left untouched.
    ProbeFailed(String),
    /// First successful poll of the session.
    Initial(Ipv4Addr),
    /// Address unchanged since the previous poll.
    Unchanged(Ipv4Addr),
    /// Address changed since the previous poll.
    Changed { from: Ipv4Addr, to: Ipv4Addr },
}

/// Result of a single poll cycle.
pub struct MonitorCycleResult {
    pub outcome: CycleOutcome,
    pub recorded: bool,
}

/// Orchestrates one poll cycle: probe → track → journal → notify.
///
/// Probe failures are an expected outcome, not an error: the loop sleeps
/// and tries again. Journal and notification failures are logged and never
/// interrupt the cycle.
pub struct MonitorService<'a> {
    probe: &'a dyn IpProbe,
    journal: &'a dyn IntervalJournal,
    notifier: &'a dyn ChangeNotifier,
    tracker: ChangeTracker,
}

impl<'a> MonitorService<'a> {
    #[must_use]
    pub fn new(
        probe: &'a dyn IpProbe,
        journal: &'a dyn IntervalJournal,
        notifier: &'a dyn ChangeNotifier,
    ) -> Self {
        Self {
            probe,
            journal,
            notifier,
            tracker: ChangeTracker::new(),
        }
    }

    /// Run a single poll cycle.
    pub async fn run_once(&mut self) -> MonitorCycleResult {
        let addr = match self.probe.probe().await {
            Ok(addr) => addr,
            Err(e) => {
                let reason = e.to_string();
                if let Err(ne) = self.notifier.notify_probe_failure(&reason) {
                    tracing::warn!("Probe failure notification failed: {ne}");
                }
                return MonitorCycleResult {
                    outcome: CycleOutcome::ProbeFailed(reason),
                    recorded: false,
                };
            }
        };

        let transition = self.tracker.observe(addr, Local::now());
        let recorded = self.record(&transition);
        self.announce(&transition);

        let outcome = match &transition {
            IpTransition::Initial(open) => CycleOutcome::Initial(open.addr),
            IpTransition::Unchanged(open) => CycleOutcome::Unchanged(open.addr),
            IpTransition::Changed { closed, opened } => CycleOutcome::Changed {
                from: closed.addr,
                to: opened.addr,
            },
        };
        MonitorCycleResult { outcome, recorded }
    }

    fn record(&self, transition: &IpTransition) -> bool {
        let result = match transition {
            IpTransition::Initial(open) | IpTransition::Unchanged(open) => {
                self.journal.update_current(open)
            }
            IpTransition::Changed { closed, opened } => self
                .journal
                .finalize_current(closed)
                .and_then(|()| self.journal.update_current(opened)),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to record interval: {e}");
                false
            }
        }
    }

    fn announce(&self, transition: &IpTransition) {
        if let IpTransition::Changed { closed, opened } = transition {
            if let Err(e) = self.notifier.notify_change(closed, opened) {
                tracing::warn!("Change notification failed: {e}");
            }
        }
        let open = match transition {
            IpTransition::Initial(open) | IpTransition::Unchanged(open) => open,
            IpTransition::Changed { opened, .. } => opened,
        };
        if let Err(e) = self.notifier.notify_observation(open) {
            tracing::warn!("Observation notification failed: {e}");
        }
    }
}
