// src/gui/app.rs
use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use eframe::egui;

use crate::{
    config::{
        consts::REFRESH_ANIM_MS,
        state::AppState,
    },
    csv::splitter_for,
    dashboard::Dashboard,
    net::{HttpSheet, SheetSource},
    store::LocalCache,
    view::TableView,
};

use super::{actions, components, poller::Poller};

pub fn run(state: AppState) -> Result<(), Box<dyn Error>> {
    let source = HttpSheet::from_options(&state.options.source)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32])
            .with_title("Attendance Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Attendance Dashboard",
        options,
        Box::new(move |cc| {
            // Avatars are loaded straight from their URLs.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(App::new(state, Arc::new(source))))
        }),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,
    pub dash: Dashboard,
    pub poller: Poller,

    // rendered rows for the current (revision, search) pair
    pub view: TableView,
    view_key: Option<(u64, String)>,

    // refresh button spins until this instant
    pub refreshing_until: Option<Instant>,
}

impl App {
    pub fn new(state: AppState, source: Arc<dyn SheetSource>) -> Self {
        let opts = &state.options;
        let dash = Dashboard::new(LocalCache::from_options(&opts.cache))
            .with_splitter(splitter_for(opts.source.split));
        let poller = Poller::new(source, opts.source.poll_interval);

        logf!(
            "Init: url={} interval={:?} cache={}",
            opts.source.url,
            opts.source.poll_interval,
            opts.cache.dir.display()
        );

        Self {
            state,
            dash,
            poller,
            view: TableView::default(),
            view_key: None,
            refreshing_until: None,
        }
    }

    /// Rebuild rows only when the roster or the search term changed.
    pub fn refresh_view(&mut self) {
        let key = (self.dash.revision(), self.state.gui.search.clone());
        if self.view_key.as_ref() != Some(&key) {
            self.view = self.dash.render(&key.1);
            self.view_key = Some(key);
        }
    }

    #[inline]
    pub fn is_refreshing(&self, now: Instant) -> bool {
        self.refreshing_until.is_some_and(|t| now < t)
    }

    pub fn start_refresh_animation(&mut self, now: Instant) {
        self.refreshing_until = Some(now + Duration::from_millis(REFRESH_ANIM_MS));
    }

    /// Earliest moment something on screen will change by itself.
    fn next_wakeup(&self, now: Instant) -> Duration {
        let candidates = [
            self.poller.next_due(),
            self.dash.notifications().next_deadline(),
            self.refreshing_until,
        ];
        candidates
            .into_iter()
            .flatten()
            .map(|t| t.saturating_duration_since(now))
            .min()
            .unwrap_or(Duration::from_millis(250))
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Results first, then timers: one callback at a time, each to completion.
        actions::apply_finished(self);
        if self.poller.due(now) {
            actions::tick(self, ctx, now);
        }
        self.dash.tick(now);
        self.refresh_view();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            components::toolbar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(action) = components::data_table::draw(ui, &self.view) {
                actions::row_action(self, action);
            }
        });

        components::confirm_delete::draw(ctx, self);
        components::notifications::draw(ctx, self);

        if self.is_refreshing(now) {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.next_wakeup(now));
        }
    }
}
