// tests/dashboard_sync.rs
//
// Fetch/diff/fallback behavior of the controller, with fake sources and an
// in-memory cache. No network.
//
use std::io;

use rollcall::dashboard::{Dashboard, LastSync, SyncOutcome};
use rollcall::model::{Attendance, AttendanceRecord, Connectivity, Snapshot};
use rollcall::net::FetchError;
use rollcall::notify::Severity;
use rollcall::store::{KeyValueStore, LocalCache};

const TWO: &str = "UID,Name,Contact,Attendance\nA1,Alice,555-1,present\nA2,Bob,555-2,absent";
const THREE: &str = "UID,Name,Contact,Attendance\nA1,Alice,555-1,present\nA2,Bob,555-2,absent\nA3,Cara,555-3,present";

fn dash() -> Dashboard {
    Dashboard::new(LocalCache::in_memory("attendanceData"))
}

fn ok(text: &'static str) -> impl Fn() -> Result<String, FetchError> + Send + Sync {
    move || Ok(text.to_string())
}

fn down() -> Result<String, FetchError> {
    Err(FetchError::Transport("connection refused".into()))
}

fn severities(d: &Dashboard) -> Vec<Severity> {
    d.notifications().visible().iter().map(|n| n.severity).collect()
}

fn count(d: &Dashboard, sev: Severity, msg: &str) -> usize {
    d.notifications()
        .visible()
        .iter()
        .filter(|n| n.severity == sev && n.message == msg)
        .count()
}

#[test]
fn first_fetch_updates_and_persists() {
    let mut d = dash();
    assert_eq!(d.sync_with(&ok(TWO)), SyncOutcome::Updated);

    assert_eq!(d.snapshot().len(), 2);
    assert_eq!(d.connectivity(), Connectivity::Online);
    assert!(matches!(d.last_sync(), LastSync::At(_)));
    assert_eq!(severities(&d), vec![Severity::Info, Severity::Success]);

    let cached = d.cache().load().unwrap().unwrap();
    assert_eq!(&cached, d.snapshot());
}

#[test]
fn identical_content_does_not_update_twice() {
    let mut d = dash();
    let src = ok(TWO);
    assert_eq!(d.sync_with(&src), SyncOutcome::Updated);
    let rev = d.revision();

    assert_eq!(d.sync_with(&src), SyncOutcome::Unchanged);
    assert_eq!(d.revision(), rev);
    assert_eq!(count(&d, Severity::Success, "Attendance data updated!"), 1);
    // Both attempts announced themselves
    assert_eq!(count(&d, Severity::Info, "Syncing with Google Sheets..."), 2);
}

#[test]
fn changed_content_replaces_whole_roster() {
    let mut d = dash();
    d.sync_with(&ok(THREE));
    d.sync_with(&ok(TWO));
    assert_eq!(d.snapshot().len(), 2);
    assert!(d.snapshot().find("A3").is_none());
    assert_eq!(count(&d, Severity::Success, "Attendance data updated!"), 2);
}

#[test]
fn failure_without_cache_is_offline_error() {
    let mut d = dash();
    let outcome = d.sync_with(&down);

    assert_eq!(outcome, SyncOutcome::Offline { cached: false });
    assert_eq!(d.connectivity(), Connectivity::Offline);
    assert!(d.snapshot().is_empty());
    assert_eq!(d.notifications().last().unwrap().severity, Severity::Error);
    assert_eq!(
        d.notifications().last().unwrap().message,
        "Connection failed - no data available"
    );
}

#[test]
fn failure_with_cache_loads_offline_copy() {
    let mut cache = LocalCache::in_memory("attendanceData");
    let three = Snapshot::new(vec![
        AttendanceRecord::new("A1", "Alice", "555-1", Attendance::Present),
        AttendanceRecord::new("A2", "Bob", "555-2", Attendance::Absent),
        AttendanceRecord::new("A3", "Cara", "555-3", Attendance::Present),
    ]);
    cache.save(&three).unwrap();

    let mut d = Dashboard::new(cache);
    let outcome = d.sync_with(&down);

    assert_eq!(outcome, SyncOutcome::Offline { cached: true });
    assert_eq!(d.snapshot(), &three);
    assert_eq!(d.connectivity(), Connectivity::Offline);
    let last = d.notifications().last().unwrap();
    assert_eq!(last.severity, Severity::Warning);
    assert_eq!(last.message, "Using offline data");
}

#[test]
fn recovery_marks_online_again() {
    let mut d = dash();
    d.sync_with(&down);
    assert_eq!(d.connectivity(), Connectivity::Offline);
    d.sync_with(&ok(TWO));
    assert_eq!(d.connectivity(), Connectivity::Online);
}

#[test]
fn status_http_error_counts_as_failure() {
    let mut d = dash();
    let outcome = d.sync_with(&|| -> Result<String, FetchError> { Err(FetchError::Status(503)) });
    assert_eq!(outcome, SyncOutcome::Offline { cached: false });
}

#[test]
fn stale_result_cannot_overwrite_newer_one() {
    let mut d = dash();
    let slow = d.begin_sync();
    let fast = d.begin_sync();
    assert!(fast > slow);
    assert_eq!(d.last_sync(), LastSync::Updating);

    assert_eq!(d.complete_sync(fast, Ok(THREE.into())), SyncOutcome::Updated);
    assert_eq!(d.complete_sync(slow, Ok(TWO.into())), SyncOutcome::Stale);
    assert_eq!(d.snapshot().len(), 3);

    // A stale failure does not flip connectivity either
    let older = d.begin_sync();
    let newer = d.begin_sync();
    d.complete_sync(newer, Ok(THREE.into()));
    assert_eq!(d.complete_sync(older, down()), SyncOutcome::Stale);
    assert_eq!(d.connectivity(), Connectivity::Online);
}

#[test]
fn delete_removes_and_persists() {
    let mut d = dash();
    d.sync_with(&ok(TWO));

    assert!(d.delete("A1"));
    assert_eq!(d.snapshot().len(), 1);
    assert_eq!(d.snapshot().records()[0].uid, "A2");

    let cached = d.cache().load().unwrap().unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(d.notifications().last().unwrap().message, "Student deleted");
}

#[test]
fn delete_unknown_uid_changes_nothing() {
    let mut d = dash();
    d.sync_with(&ok(TWO));
    let before = d.snapshot().clone();
    let rev = d.revision();

    assert!(!d.delete("ZZ"));
    assert_eq!(d.snapshot(), &before);
    assert_eq!(d.revision(), rev);
    assert_eq!(d.cache().load().unwrap().unwrap(), before);
    assert_eq!(d.notifications().last().unwrap().severity, Severity::Warning);
}

#[test]
fn delete_removes_duplicate_uids_together() {
    let mut d = dash();
    d.sync_with(&ok("h\nA1,Alice,1,present\nA1,Alias,2,absent\nA2,Bob,3,absent"));
    assert_eq!(d.snapshot().len(), 3);
    assert!(d.delete("A1"));
    assert_eq!(d.snapshot().len(), 1);
}

#[test]
fn edit_is_reported_as_unsupported() {
    use rollcall::dashboard::EditError;

    let mut d = dash();
    d.sync_with(&ok(TWO));
    let before = d.snapshot().clone();

    assert_eq!(d.edit("A2"), Err(EditError::Unsupported));
    assert_eq!(d.snapshot(), &before);
    assert!(d.notifications().last().unwrap().message.contains("Bob"));

    assert_eq!(d.edit("nope"), Err(EditError::NotFound("nope".into())));
}

#[test]
fn empty_search_returns_everything_in_order() {
    let mut d = dash();
    d.sync_with(&ok(THREE));
    let view = d.render("");
    let uids: Vec<&str> = view.rows.iter().map(|r| r.uid.as_str()).collect();
    assert_eq!(uids, vec!["A1", "A2", "A3"]);
    assert_eq!((view.present, view.absent), (2, 1));
}

#[test]
fn search_matches_name_uid_and_contact() {
    let mut d = dash();
    d.sync_with(&ok("h\nX9,Alice Smith,alice@school.org,present\nB2,Bob,BOB@SCHOOL.ORG,absent"));

    assert_eq!(d.render("SMITH").rows.len(), 1);
    assert_eq!(d.render("x9").rows[0].name, "Alice Smith");
    assert_eq!(d.render("school.org").rows.len(), 1);

    // The term is lower-cased but contact is not
    let v = d.render("BOB@SCHOOL");
    assert_eq!(v.rows.len(), 0);
    assert_eq!(d.render("b2").rows[0].contact, "BOB@SCHOOL.ORG");

    // Counts ignore the filter
    assert_eq!(v.present + v.absent, 2);
}

#[test]
fn export_of_empty_roster_warns() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = dash();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    assert!(d.export(dir.path(), today).unwrap().is_none());
    assert_eq!(d.notifications().last().unwrap().message, "No data to export");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn export_writes_dated_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = dash();
    d.sync_with(&ok(TWO));
    let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    let path = d.export(dir.path(), today).unwrap().unwrap();
    assert!(path.ends_with("attendance_2024-03-09.csv"));
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text, "UID,Name,Contact,Attendance\nA1,Alice,555-1,present\nA2,Bob,555-2,absent\n");
    assert_eq!(d.notifications().last().unwrap().severity, Severity::Success);
}

#[test]
fn dashboard_tick_expires_toasts() {
    use rollcall::notify::NotificationCenter;
    use std::time::{Duration, Instant};

    let mut d = dash().with_notifications(NotificationCenter::with_timing(
        Duration::from_millis(50),
        Duration::from_millis(10),
    ));
    d.sync_with(&ok(TWO));
    assert_eq!(d.notifications().visible().len(), 2);

    d.tick(Instant::now() + Duration::from_secs(1));
    assert!(d.notifications().is_empty());
}

#[test]
fn blank_reply_falls_back_and_keeps_offline_copy() {
    let mut d = dash();
    d.sync_with(&ok(TWO));
    let rev = d.revision();

    let outcome = d.sync_with(&ok("  \n"));
    assert_eq!(outcome, SyncOutcome::Offline { cached: true });
    assert_eq!(d.snapshot().len(), 2);
    assert_eq!(d.revision(), rev);
    assert_eq!(d.connectivity(), Connectivity::Offline);
    assert_eq!(d.cache().load().unwrap().unwrap().len(), 2);
    assert_eq!(d.notifications().last().unwrap().message, "Using offline data");
    assert_eq!(count(&d, Severity::Success, "Attendance data updated!"), 1);
}

#[test]
fn blank_reply_without_cache_is_offline_error() {
    let mut d = dash();
    assert_eq!(d.sync_with(&ok("")), SyncOutcome::Offline { cached: false });
    assert!(d.cache().load().unwrap().is_none());
    assert_eq!(d.notifications().last().unwrap().severity, Severity::Error);
}

/* ---------- storage failures ---------- */

/// Store whose writes always fail and whose reads return `stored`.
struct BrokenStore {
    stored: Option<String>,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> io::Result<Option<String>> {
        Ok(self.stored.clone())
    }

    fn set(&mut self, _key: &str, _value: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

fn broken(stored: Option<&str>) -> Dashboard {
    let store = BrokenStore { stored: stored.map(str::to_string) };
    Dashboard::new(LocalCache::new(Box::new(store), "attendanceData"))
}

#[test]
fn failed_save_still_applies_roster_and_warns() {
    let mut d = broken(None);
    assert_eq!(d.sync_with(&ok(TWO)), SyncOutcome::Updated);

    assert_eq!(d.snapshot().len(), 2);
    assert_eq!(d.connectivity(), Connectivity::Online);
    assert_eq!(count(&d, Severity::Warning, "Could not save offline copy"), 1);
    assert_eq!(d.notifications().last().unwrap().message, "Attendance data updated!");
}

#[test]
fn failed_save_on_delete_still_deletes() {
    let mut d = broken(None);
    d.sync_with(&ok(TWO));
    assert!(d.delete("A1"));
    assert_eq!(d.snapshot().len(), 1);
    assert_eq!(count(&d, Severity::Warning, "Could not save offline copy"), 2);
}

#[test]
fn corrupt_cache_counts_as_no_cache() {
    let mut d = broken(Some("{not json"));
    let outcome = d.sync_with(&down);

    assert_eq!(outcome, SyncOutcome::Offline { cached: false });
    assert!(d.snapshot().is_empty());
    let last = d.notifications().last().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert_eq!(last.message, "Connection failed - no data available");
    assert!(!d.load_cached());
}
