// src/gui/components/toolbar.rs
//
// Header strip: counts, connectivity, last sync, search, refresh, export.

use std::time::Instant;

use eframe::egui::{self, Color32, RichText, widgets::Spinner};

use crate::gui::{actions, app::App};

const GREEN: Color32 = Color32::from_rgb(0x2E, 0xCC, 0x71);
const RED: Color32 = Color32::from_rgb(0xE7, 0x4C, 0x3C);

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let now = Instant::now();

    ui.horizontal(|ui| {
        ui.heading("Attendance");
        ui.separator();

        ui.label(RichText::new(format!("Present: {}", app.view.present)).color(GREEN).strong());
        ui.label(RichText::new(format!("Absent: {}", app.view.absent)).color(RED).strong());
        ui.separator();

        // Connectivity indicator
        let conn = app.dash.connectivity();
        let dot = if conn.is_online() { GREEN } else { RED };
        ui.label(RichText::new("●").color(dot));
        ui.label(conn.label());
        ui.separator();

        ui.label(app.dash.last_sync().to_string());
    });

    ui.horizontal(|ui| {
        ui.label("🔍");
        let search = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.search)
                .hint_text("Search by name, UID or contact")
                .desired_width(280.0),
        );
        if search.changed() {
            logd!("UI: search → {:?}", app.state.gui.search);
            app.refresh_view();
        }

        ui.separator();

        if ui.button("🔄 Refresh").clicked() {
            actions::refresh(app, ui.ctx());
        }
        if app.is_refreshing(now) {
            ui.add(Spinner::new().size(16.0));
        }

        if ui.button("⬇ Export").clicked() {
            actions::export(app);
        }

        ui.label(
            RichText::new(format!("{} of {} shown", app.view.rows.len(), app.view.total()))
                .weak(),
        );
    });
}
