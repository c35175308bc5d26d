// src/gui/components/confirm_delete.rs
use eframe::egui::{self, Align2};

use crate::gui::{actions, app::App};

/// Blocking yes/no dialog while a delete is pending.
pub fn draw(ctx: &egui::Context, app: &mut App) {
    let Some(uid) = app.state.gui.pending_delete.clone() else { return };

    let name = app
        .dash
        .snapshot()
        .find(&uid)
        .map(|r| r.name.clone())
        .unwrap_or_default();

    let mut answer: Option<bool> = None;

    egui::Window::new("Delete student")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Are you sure you want to delete this student?");
            if !name.is_empty() {
                ui.label(egui::RichText::new(format!("{name} ({uid})")).strong());
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() { answer = Some(true); }
                if ui.button("Cancel").clicked() { answer = Some(false); }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        answer = Some(false);
    }

    if let Some(confirmed) = answer {
        actions::confirm_delete(app, confirmed);
    }
}
