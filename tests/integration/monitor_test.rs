#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::Mutex;

use async_trait::async_trait;

use ipwatch::application::services::monitor::{CycleOutcome, MonitorService};
use ipwatch::domain::entities::ChangeInterval;
use ipwatch::domain::ports::notifier::{ChangeNotifier, NotificationError};
use ipwatch::domain::ports::probe::{IpProbe, ProbeError};
use ipwatch::infrastructure::journal::CsvJournal;

const IP_A: Ipv4Addr = Ipv4Addr::new(203, 0, 113, 7);
const IP_B: Ipv4Addr = Ipv4Addr::new(198, 51, 100, 42);

// ---------------------------------------------------------------------------
// ScriptedProbe
// ---------------------------------------------------------------------------

struct ScriptedProbe {
    responses: Mutex<VecDeque<Result<Ipv4Addr, ProbeError>>>,
}

impl ScriptedProbe {
    fn new(responses: Vec<Result<Ipv4Addr, ProbeError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl IpProbe for ScriptedProbe {
    async fn probe(&self) -> Result<Ipv4Addr, ProbeError> {
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .expect("probe called more often than scripted")
    }
}

// ---------------------------------------------------------------------------
// TrackingNotifier
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TrackingNotifier {
    changes: Mutex<Vec<(Ipv4Addr, Ipv4Addr)>>,
    failures: Mutex<Vec<String>>,
}

impl ChangeNotifier for TrackingNotifier {
    fn announce_start(&self, _: &str, _: u64, _: &str) -> Result<(), NotificationError> {
        Ok(())
    }

    fn notify_observation(&self, _: &ChangeInterval) -> Result<(), NotificationError> {
        Ok(())
    }

    fn notify_change(
        &self,
        closed: &ChangeInterval,
        opened: &ChangeInterval,
    ) -> Result<(), NotificationError> {
        self.changes
            .lock()
            .expect("lock")
            .push((closed.addr, opened.addr));
        Ok(())
    }

    fn notify_probe_failure(&self, reason: &str) -> Result<(), NotificationError> {
        self.failures.lock().expect("lock").push(reason.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_journal(dir: &tempfile::TempDir) -> CsvJournal {
    let stamp = chrono::Local::now();
    CsvJournal::create(dir.path().to_str().expect("utf-8 path"), "it", stamp)
        .expect("create journal")
}

fn journal_lines(journal: &CsvJournal) -> Vec<String> {
    std::fs::read_to_string(journal.path())
        .expect("read journal")
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stable_address_keeps_a_single_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = make_journal(&dir);
    let probe = ScriptedProbe::new(vec![Ok(IP_A), Ok(IP_A), Ok(IP_A)]);
    let notifier = TrackingNotifier::default();
    let mut service = MonitorService::new(&probe, &journal, &notifier);

    for _ in 0..3 {
        let result = service.run_once().await;
        assert!(result.recorded);
    }

    let lines = journal_lines(&journal);
    assert_eq!(lines.len(), 2, "header plus exactly one row");
    assert!(lines[1].starts_with("203.0.113.7,"));
    assert!(notifier.changes.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn address_change_closes_the_row_and_opens_a_new_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = make_journal(&dir);
    let probe = ScriptedProbe::new(vec![Ok(IP_A), Ok(IP_A), Ok(IP_B)]);
    let notifier = TrackingNotifier::default();
    let mut service = MonitorService::new(&probe, &journal, &notifier);

    service.run_once().await;
    service.run_once().await;
    let result = service.run_once().await;

    assert_eq!(
        result.outcome,
        CycleOutcome::Changed {
            from: IP_A,
            to: IP_B
        }
    );

    let lines = journal_lines(&journal);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("203.0.113.7,"));
    assert!(lines[2].starts_with("198.51.100.42,"));
    assert_eq!(
        notifier.changes.lock().expect("lock").clone(),
        vec![(IP_A, IP_B)]
    );
}

#[tokio::test]
async fn probe_failure_does_not_close_the_open_interval() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = make_journal(&dir);
    let probe = ScriptedProbe::new(vec![
        Ok(IP_A),
        Err(ProbeError::RequestFailed("timeout".into())),
        Err(ProbeError::EmptyResponse),
        Ok(IP_A),
    ]);
    let notifier = TrackingNotifier::default();
    let mut service = MonitorService::new(&probe, &journal, &notifier);

    for _ in 0..4 {
        service.run_once().await;
    }

    let lines = journal_lines(&journal);
    assert_eq!(lines.len(), 2, "failures must not add or close rows");
    assert_eq!(notifier.failures.lock().expect("lock").len(), 2);
    assert!(notifier.changes.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn recorded_rows_roundtrip_through_read_intervals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = make_journal(&dir);
    let probe = ScriptedProbe::new(vec![Ok(IP_A), Ok(IP_B), Ok(IP_B), Ok(IP_A)]);
    let notifier = TrackingNotifier::default();
    let mut service = MonitorService::new(&probe, &journal, &notifier);

    for _ in 0..4 {
        service.run_once().await;
    }

    let intervals = CsvJournal::read_intervals(journal.path()).expect("read back");
    let addrs: Vec<Ipv4Addr> = intervals.iter().map(|i| i.addr).collect();
    assert_eq!(addrs, vec![IP_A, IP_B, IP_A]);
    for interval in &intervals {
        assert!(interval.started_at <= interval.last_seen_at);
    }
}
