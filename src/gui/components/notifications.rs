// src/gui/components/notifications.rs
//
// Toast stack in the bottom-right corner. Fading entries are drawn with
// decreasing opacity; the × button starts the fade early.

use std::time::Instant;

use eframe::egui::{self, Align2, Color32, RichText};

use crate::{gui::app::App, notify::Severity};

fn accent(sev: Severity) -> Color32 {
    match sev {
        Severity::Info    => Color32::from_rgb(0x34, 0x98, 0xDB),
        Severity::Success => Color32::from_rgb(0x2E, 0xCC, 0x71),
        Severity::Warning => Color32::from_rgb(0xF3, 0x9C, 0x12),
        Severity::Error   => Color32::from_rgb(0xE7, 0x4C, 0x3C),
    }
}

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let notes = app.dash.notifications();
    if notes.is_empty() { return; }

    let now = Instant::now();
    let fade = notes.fade();
    let mut dismissed: Vec<u64> = Vec::new();

    egui::Area::new(egui::Id::new("notification_center"))
        .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for n in notes.visible() {
                ui.scope(|ui| {
                    ui.multiply_opacity(n.opacity(now, fade));
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.5, accent(n.severity)))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(n.severity.icon()).color(accent(n.severity)));
                                ui.label(n.message.as_str());
                                if ui.small_button("×").clicked() {
                                    dismissed.push(n.id);
                                }
                            });
                        });
                });
                ui.add_space(4.0);
            }
        });

    for id in dismissed {
        app.dash.notifications_mut().dismiss_at(id, now);
    }
}
