// src/gui/actions/sync.rs
use std::time::Instant;

use eframe::egui;

use crate::gui::app::App;

/// Timer tick or startup.
pub fn tick(app: &mut App, ctx: &egui::Context, now: Instant) {
    app.poller.advance(now);
    start_sync(app, ctx);
}

/// Kick off one fetch, unless too many are already hanging.
pub fn start_sync(app: &mut App, ctx: &egui::Context) {
    if !app.poller.has_capacity() {
        logw!("Poll: {} request(s) still pending, skipping this fetch", app.poller.in_flight());
        return;
    }
    let ticket = app.dash.begin_sync();
    app.poller.fire(ticket, ctx);
}

/// Refresh button.
pub fn refresh(app: &mut App, ctx: &egui::Context) {
    logf!("UI: Manual refresh ({} fetch(es) already in flight)", app.poller.in_flight());
    app.start_refresh_animation(Instant::now());
    start_sync(app, ctx);
}

/// Apply fetch results that arrived since the last frame.
pub fn apply_finished(app: &mut App) {
    for (ticket, result) in app.poller.drain() {
        let outcome = app.dash.complete_sync(ticket, result);
        logd!("Sync: #{} → {:?}", ticket.seq(), outcome);
    }
}
