// tests/poller.rs
//
// Timer cadence and in-flight cap of the GUI poller, with a headless
// egui context and fake sources.
//
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui;
use rollcall::dashboard::Dashboard;
use rollcall::gui::poller::Poller;
use rollcall::net::{FetchError, SheetSource};
use rollcall::store::LocalCache;

const SHEET: &str = "UID,Name,Contact,Attendance\nA1,Alice,555-1,present";
const INTERVAL: Duration = Duration::from_secs(3);

fn quick() -> Arc<dyn SheetSource> {
    Arc::new(|| -> Result<String, FetchError> { Ok(SHEET.to_string()) })
}

fn dash() -> Dashboard {
    Dashboard::new(LocalCache::in_memory("attendanceData"))
}

/// Collect results until nothing is in flight (or give up after 5 s).
fn wait_all(p: &mut Poller) -> usize {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut got = 0;
    while p.in_flight() > 0 && Instant::now() < deadline {
        got += p.drain().len();
        thread::sleep(Duration::from_millis(5));
    }
    got
}

#[test]
fn due_at_startup_then_every_interval() {
    let t0 = Instant::now();
    let mut p = Poller::new(quick(), INTERVAL);
    assert!(p.due(t0));

    p.advance(t0);
    assert!(!p.due(t0 + Duration::from_millis(2_999)));
    assert!(p.due(t0 + INTERVAL));

    // Cadence follows the deadline, not the frame that noticed it
    p.advance(t0 + Duration::from_millis(3_200));
    assert_eq!(p.next_due(), Some(t0 + 2 * INTERVAL));
}

#[test]
fn far_behind_timer_restarts_from_now() {
    let t0 = Instant::now();
    let mut p = Poller::new(quick(), INTERVAL);
    p.advance(t0);

    let late = t0 + Duration::from_secs(30);
    p.advance(late);
    assert_eq!(p.next_due(), Some(late + INTERVAL));
}

#[test]
fn manual_fire_does_not_move_the_timer() {
    let ctx = egui::Context::default();
    let mut d = dash();
    let t0 = Instant::now();
    let mut p = Poller::new(quick(), INTERVAL);
    p.advance(t0);
    let before = p.next_due();

    p.fire(d.begin_sync(), &ctx);
    assert_eq!(p.next_due(), before);

    assert_eq!(wait_all(&mut p), 1);
}

#[test]
fn results_come_back_through_drain() {
    let ctx = egui::Context::default();
    let mut d = dash();
    let mut p = Poller::new(quick(), INTERVAL);

    p.fire(d.begin_sync(), &ctx);
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut done = Vec::new();
    while done.is_empty() && Instant::now() < deadline {
        done = p.drain();
        thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(done.len(), 1);
    assert_eq!(p.in_flight(), 0);
    let (ticket, result) = done.remove(0);
    d.complete_sync(ticket, result);
    assert_eq!(d.snapshot().len(), 1);
}

#[test]
fn hung_requests_are_capped() {
    let release = Arc::new(AtomicBool::new(false));
    let gate = Arc::clone(&release);
    let hanging: Arc<dyn SheetSource> = Arc::new(move || -> Result<String, FetchError> {
        while !gate.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(2));
        }
        Ok(SHEET.to_string())
    });

    let ctx = egui::Context::default();
    let mut d = dash();
    let mut p = Poller::new(hanging, INTERVAL).with_max_in_flight(3);

    for _ in 0..3 {
        assert!(p.has_capacity());
        p.fire(d.begin_sync(), &ctx);
    }
    assert!(!p.has_capacity());
    assert_eq!(p.drain().len(), 0);

    release.store(true, Ordering::SeqCst);
    assert_eq!(wait_all(&mut p), 3);
    assert!(p.has_capacity());
}
