#![allow(clippy::expect_used)]

use std::net::Ipv4Addr;

use chrono::{DateTime, Local, TimeZone};

use ipwatch::domain::entities::ChangeInterval;
use ipwatch::domain::ports::journal::{IntervalJournal, JournalError};
use ipwatch::infrastructure::journal::CsvJournal;

const IP_A: Ipv4Addr = Ipv4Addr::new(203, 0, 113, 7);
const IP_B: Ipv4Addr = Ipv4Addr::new(198, 51, 100, 42);

fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 3, 14, hour, minute, second)
        .single()
        .expect("valid timestamp")
}

fn make_journal(dir: &tempfile::TempDir) -> CsvJournal {
    CsvJournal::create(dir.path().to_str().expect("utf-8 path"), "it", at(9, 0, 0))
        .expect("create journal")
}

fn content(journal: &CsvJournal) -> String {
    std::fs::read_to_string(journal.path()).expect("read journal")
}

#[test]
fn a_full_session_produces_the_expected_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = make_journal(&dir);
    let sink: &dyn IntervalJournal = &journal;

    // First address observed over three polls.
    let mut first = ChangeInterval::opened(IP_A, at(9, 0, 0));
    sink.update_current(&first).expect("poll 1");
    first.last_seen_at = at(9, 1, 0);
    sink.update_current(&first).expect("poll 2");
    first.last_seen_at = at(9, 2, 0);
    sink.update_current(&first).expect("poll 3");

    // Address changes on the fourth poll.
    sink.finalize_current(&first).expect("close first");
    let mut second = ChangeInterval::opened(IP_B, at(9, 3, 0));
    sink.update_current(&second).expect("poll 4");

    // And holds for one more poll.
    second.last_seen_at = at(9, 4, 0);
    sink.update_current(&second).expect("poll 5");

    assert_eq!(
        content(&journal),
        "ip_address,start_time,end_time\n\
         203.0.113.7,20260314_090000,20260314_090200\n\
         198.51.100.42,20260314_090300,20260314_090400\n"
    );
}

#[test]
fn the_open_row_is_always_on_disk() {
    // A crash between polls must leave a readable file that already
    // contains the interval in progress.
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = make_journal(&dir);

    let interval = ChangeInterval::opened(IP_A, at(9, 0, 0));
    journal.update_current(&interval).expect("poll 1");

    let intervals = CsvJournal::read_intervals(journal.path()).expect("read back");
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].addr, IP_A);
    assert_eq!(intervals[0].started_at, at(9, 0, 0));
}

#[test]
fn consecutive_changes_append_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal = make_journal(&dir);

    let addrs = [IP_A, IP_B, IP_A];
    for (idx, addr) in addrs.iter().enumerate() {
        let minute = u32::try_from(idx).expect("small index");
        let interval = ChangeInterval::opened(*addr, at(9, minute, 0));
        journal.update_current(&interval).expect("open row");
        journal.finalize_current(&interval).expect("close row");
    }

    let intervals = CsvJournal::read_intervals(journal.path()).expect("read back");
    let recorded: Vec<Ipv4Addr> = intervals.iter().map(|i| i.addr).collect();
    assert_eq!(recorded, addrs);
}

#[test]
fn read_intervals_rejects_foreign_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("foreign.csv");
    std::fs::write(&path, "a,b,c\n1,2,3\n").expect("write");

    let err = CsvJournal::read_intervals(&path).expect_err("should fail");
    assert!(matches!(err, JournalError::Malformed(_)));
}
