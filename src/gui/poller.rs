// src/gui/poller.rs
//
// Fires fetches on worker threads and hands results back to the UI thread.
// The timer keeps its own cadence: it never waits for an in-flight request
// and manual fires do not move it. The Dashboard's tickets sort out which
// result is newest.

use std::{
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::{Duration, Instant},
};

use eframe::egui;

use crate::{
    config::consts::MAX_IN_FLIGHT,
    dashboard::SyncTicket,
    net::{FetchError, SheetSource},
};

pub type Completed = (SyncTicket, Result<String, FetchError>);

pub struct Poller {
    source: Arc<dyn SheetSource>,
    interval: Duration,
    next_tick: Option<Instant>,
    in_flight: usize,
    max_in_flight: usize,
    tx: Sender<Completed>,
    rx: Receiver<Completed>,
}

impl Poller {
    pub fn new(source: Arc<dyn SheetSource>, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            interval,
            next_tick: None,
            in_flight: 0,
            max_in_flight: MAX_IN_FLIGHT,
            tx,
            rx,
        }
    }

    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    /// True at startup and whenever the timer's deadline has passed.
    pub fn due(&self, now: Instant) -> bool {
        self.next_tick.is_none_or(|t| now >= t)
    }

    /// Consume one timer tick. Keeps a fixed cadence from the previous
    /// deadline; if frames fell far behind, restarts from `now`.
    pub fn advance(&mut self, now: Instant) {
        let mut next = self.next_tick.unwrap_or(now) + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_tick = Some(next);
    }

    /// When the next timed fetch should happen.
    pub fn next_due(&self) -> Option<Instant> { self.next_tick }

    #[inline] pub fn in_flight(&self) -> usize { self.in_flight }

    /// False while too many requests are still hanging.
    #[inline] pub fn has_capacity(&self) -> bool { self.in_flight < self.max_in_flight }

    /// Start one fetch for `ticket` on a worker thread.
    pub fn fire(&mut self, ticket: SyncTicket, ctx: &egui::Context) {
        self.in_flight += 1;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        logd!("Poll: fetch #{} started ({} in flight)", ticket.seq(), self.in_flight);
        thread::spawn(move || {
            let result = source.fetch();
            // Receiver gone means the window closed; nothing to do.
            let _ = tx.send((ticket, result));
            ctx.request_repaint();
        });
    }

    /// Everything that finished since the last frame, in arrival order.
    pub fn drain(&mut self) -> Vec<Completed> {
        let done: Vec<Completed> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(done.len());
        done
    }
}
