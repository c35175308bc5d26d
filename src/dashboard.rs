// src/dashboard.rs
//
// The controller. Owns the roster, connectivity, last-sync display,
// notifications and the offline cache; every mutation goes through here.
//
// Fetches may overlap (the timer never waits), so each one is stamped with
// a ticket from `begin_sync`. A completion is applied only if its ticket is
// newer than the last one applied; older ones are dropped as stale.

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::{DateTime, Local, NaiveDate};

use crate::{
    csv::{self, NaiveSplit, RowSplitter},
    export,
    model::{Connectivity, Snapshot},
    net::{FetchError, SheetSource},
    notify::{NotificationCenter, Severity},
    store::LocalCache,
    view::{self, TableView},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyncTicket(u64);

impl SyncTicket {
    pub fn seq(self) -> u64 { self.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LastSync {
    Never,
    Updating,
    At(DateTime<Local>),
}

impl fmt::Display for LastSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastSync::Never    => write!(f, "Last sync: never"),
            LastSync::Updating => write!(f, "Last sync: Updating..."),
            LastSync::At(t)    => write!(f, "Last sync: {}", t.format("%H:%M:%S")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// New content replaced the roster.
    Updated,
    /// Same content as before; nothing re-rendered.
    Unchanged,
    /// A newer fetch already landed; this result was discarded.
    Stale,
    /// Fetch failed. `cached` tells whether the offline copy was loaded.
    Offline { cached: bool },
}

impl SyncOutcome {
    pub fn changed_view(self) -> bool {
        matches!(self, SyncOutcome::Updated | SyncOutcome::Offline { cached: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    NotFound(String),
    /// Editing is not available yet; nothing was changed.
    Unsupported,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::NotFound(uid) => write!(f, "no student with UID {uid}"),
            EditError::Unsupported   => write!(f, "editing is not supported yet"),
        }
    }
}

impl std::error::Error for EditError {}

pub struct Dashboard {
    snapshot: Snapshot,
    connectivity: Connectivity,
    last_sync: LastSync,
    notes: NotificationCenter,
    cache: LocalCache,
    splitter: Box<dyn RowSplitter>,
    next_seq: u64,
    applied_seq: u64,
    /// Bumped whenever the roster visibly changes; views key their caches on it.
    revision: u64,
}

impl Dashboard {
    pub fn new(cache: LocalCache) -> Self {
        Self {
            snapshot: Snapshot::default(),
            connectivity: Connectivity::Online,
            last_sync: LastSync::Never,
            notes: NotificationCenter::default(),
            cache,
            splitter: Box::new(NaiveSplit),
            next_seq: 0,
            applied_seq: 0,
            revision: 0,
        }
    }

    pub fn with_splitter(mut self, splitter: Box<dyn RowSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn with_notifications(mut self, notes: NotificationCenter) -> Self {
        self.notes = notes;
        self
    }

    /* ---------- read access ---------- */

    #[inline] pub fn snapshot(&self) -> &Snapshot { &self.snapshot }
    #[inline] pub fn connectivity(&self) -> Connectivity { self.connectivity }
    #[inline] pub fn last_sync(&self) -> LastSync { self.last_sync }
    #[inline] pub fn revision(&self) -> u64 { self.revision }
    #[inline] pub fn notifications(&self) -> &NotificationCenter { &self.notes }
    #[inline] pub fn notifications_mut(&mut self) -> &mut NotificationCenter { &mut self.notes }
    #[inline] pub fn cache(&self) -> &LocalCache { &self.cache }

    pub fn render(&self, search: &str) -> TableView {
        view::render(&self.snapshot, search)
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.notes.notify(message, severity)
    }

    /* ---------- sync ---------- */

    /// Call right before a fetch starts.
    pub fn begin_sync(&mut self) -> SyncTicket {
        self.next_seq += 1;
        self.notes.notify("Syncing with Google Sheets...", Severity::Info);
        self.last_sync = LastSync::Updating;
        SyncTicket(self.next_seq)
    }

    /// Apply a finished fetch.
    pub fn complete_sync(&mut self, ticket: SyncTicket, result: Result<String, FetchError>) -> SyncOutcome {
        if ticket.0 <= self.applied_seq {
            logd!("Sync: dropping stale result #{} (applied #{})", ticket.0, self.applied_seq);
            return SyncOutcome::Stale;
        }
        self.applied_seq = ticket.0;

        match result {
            Ok(text) => self.apply_fetched(&text),
            Err(e) => self.apply_failure(&e),
        }
    }

    /// One full cycle against `source`, on the calling thread.
    pub fn sync_with(&mut self, source: &dyn SheetSource) -> SyncOutcome {
        let ticket = self.begin_sync();
        let result = source.fetch();
        self.complete_sync(ticket, result)
    }

    fn apply_fetched(&mut self, text: &str) -> SyncOutcome {
        // A blank body is a broken reply, not an empty class.
        let fresh = match csv::parse_snapshot(text, self.splitter.as_ref()) {
            Ok(fresh) => fresh,
            Err(e) => return self.apply_failure(&e),
        };
        logd!("Sync: parsed {} record(s)", fresh.len());

        self.persist(&fresh);
        self.last_sync = LastSync::At(Local::now());
        self.connectivity = Connectivity::Online;

        if fresh == self.snapshot {
            return SyncOutcome::Unchanged;
        }

        logf!(
            "Sync: roster updated ({} → {} record(s))",
            self.snapshot.len(),
            fresh.len()
        );
        self.snapshot = fresh;
        self.revision += 1;
        self.notes.notify("Attendance data updated!", Severity::Success);
        SyncOutcome::Updated
    }

    fn apply_failure(&mut self, err: &dyn std::error::Error) -> SyncOutcome {
        loge!("Fetch error: {}", err);
        self.connectivity = Connectivity::Offline;

        let cached = match self.cache.load() {
            Ok(found) => found,
            Err(e) => {
                loge!("Cache: Load failed: {}", e);
                None
            }
        };

        match cached {
            Some(snapshot) => {
                logf!("Cache: Using offline data ({} record(s))", snapshot.len());
                if snapshot != self.snapshot {
                    self.snapshot = snapshot;
                    self.revision += 1;
                }
                self.notes.notify("Using offline data", Severity::Warning);
                SyncOutcome::Offline { cached: true }
            }
            None => {
                self.notes.notify("Connection failed - no data available", Severity::Error);
                SyncOutcome::Offline { cached: false }
            }
        }
    }

    /// Save the roster; storage trouble is reported, never fatal.
    fn persist(&mut self, snapshot: &Snapshot) -> bool {
        match self.cache.save(snapshot) {
            Ok(()) => true,
            Err(e) => {
                logw!("Cache: Save failed for key={}: {}", self.cache.key(), e);
                self.notes.notify("Could not save offline copy", Severity::Warning);
                false
            }
        }
    }

    /// Load the offline copy without fetching (CLI `show`/`delete`).
    pub fn load_cached(&mut self) -> bool {
        match self.cache.load() {
            Ok(Some(snapshot)) => {
                if snapshot != self.snapshot {
                    self.snapshot = snapshot;
                    self.revision += 1;
                }
                true
            }
            Ok(None) => false,
            Err(e) => {
                loge!("Cache: Load failed: {}", e);
                false
            }
        }
    }

    /* ---------- row actions ---------- */

    pub fn edit(&mut self, uid: &str) -> Result<(), EditError> {
        let Some(record) = self.snapshot.find(uid) else {
            return Err(EditError::NotFound(s!(uid)));
        };
        let msg = format!("Editing {} is not supported yet", record.name);
        logf!("Edit: requested for uid={} ({:?})", uid, record);
        self.notes.notify(msg, Severity::Info);
        Err(EditError::Unsupported)
    }

    /// Remove every record with `uid` and persist. The front end asks for
    /// confirmation before calling this. Returns false if the uid was unknown.
    pub fn delete(&mut self, uid: &str) -> bool {
        let removed = self.snapshot.remove_uid(uid);
        if removed == 0 {
            logd!("Delete: uid={} not found", uid);
            self.notes.notify(format!("No student with UID {uid}"), Severity::Warning);
            return false;
        }

        logf!("Delete: uid={} removed={} remaining={}", uid, removed, self.snapshot.len());
        self.revision += 1;
        let snapshot = self.snapshot.clone();
        self.persist(&snapshot);
        self.notes.notify("Student deleted", Severity::Success);
        true
    }

    /* ---------- export ---------- */

    /// Write `attendance_<date>.csv` into `dir`. `Ok(None)` when there is
    /// nothing to export.
    pub fn export(&mut self, dir: &Path, date: NaiveDate) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
        if self.snapshot.is_empty() {
            logd!("Export: Clicked, but there's nothing to export");
            self.notes.notify("No data to export", Severity::Warning);
            return Ok(None);
        }

        match export::write_export(dir, &self.snapshot, date) {
            Ok(path) => {
                logf!("Export: OK rows={} → {}", self.snapshot.len(), path.display());
                self.notes.notify("Data exported successfully", Severity::Success);
                Ok(Some(path))
            }
            Err(e) => {
                loge!("Export: Error: {}", e);
                self.notes.notify(format!("Export error: {e}"), Severity::Error);
                Err(e.into())
            }
        }
    }

    /// Advance notification timers.
    pub fn tick(&mut self, now: Instant) {
        self.notes.tick(now);
    }
}
