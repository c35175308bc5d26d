// src/gui/components/data_table.rs
//
// Draws the roster table. Purely a view: it reads the rendered rows and
// reports which row button was clicked; the caller applies it.

use eframe::egui::{self, Align, Color32, Layout, RichText, TextWrapMode, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::{
    gui::actions::RowAction,
    model::Attendance,
    view::{RowView, TableView},
};

const HEADERS: [&str; 5] = ["UID", "Name", "Contact", "Status", "Actions"];
const ROW_H: f32 = 32.0;
const AVATAR: f32 = 24.0;

pub fn draw(ui: &mut egui::Ui, view: &TableView) -> Option<RowAction> {
    if view.rows.is_empty() {
        ui.centered_and_justified(|ui| {
            let msg = if view.total() == 0 { "No attendance data yet" } else { "No matching students" };
            ui.label(RichText::new(msg).weak());
        });
        return None;
    }

    // Ensure scroll bars allocate space (not floating over content)
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let mut clicked: Option<RowAction> = None;

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(110.0).resizable(true).clip(true).at_least(40.0))
        .column(Column::initial(240.0).resizable(true).clip(true).at_least(80.0))
        .column(Column::initial(160.0).resizable(true).clip(true).at_least(60.0))
        .column(Column::initial(90.0).resizable(false))
        .column(Column::remainder().at_least(80.0))
        .header(24.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                });
            }
        })
        .body(|body| {
            body.rows(ROW_H, view.rows.len(), |mut row| {
                let Some(r) = view.rows.get(row.index()) else { return };

                row.col(|ui| { ui.label(r.uid.as_str()); });
                row.col(|ui| name_cell(ui, r));
                row.col(|ui| { ui.label(r.contact.as_str()); });
                row.col(|ui| status_badge(ui, r.status));
                row.col(|ui| {
                    if ui.small_button("✏").on_hover_text("Edit").clicked() {
                        clicked = Some(RowAction::Edit(r.uid.clone()));
                    }
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        clicked = Some(RowAction::Delete(r.uid.clone()));
                    }
                });
            });
        });

    clicked
}

fn name_cell(ui: &mut egui::Ui, r: &RowView) {
    ui.add(
        egui::Image::new(r.avatar_url.as_str())
            .fit_to_exact_size(Vec2::splat(AVATAR))
            .alt_text(r.name.as_str()),
    );
    ui.label(r.name.as_str());
}

fn status_badge(ui: &mut egui::Ui, status: Attendance) {
    let (fg, bg) = match status {
        Attendance::Present => (Color32::from_rgb(0x1E, 0x84, 0x49), Color32::from_rgb(0xD5, 0xF5, 0xE3)),
        Attendance::Absent  => (Color32::from_rgb(0xA9, 0x32, 0x26), Color32::from_rgb(0xFA, 0xDB, 0xD8)),
    };
    egui::Frame::new()
        .fill(bg)
        .corner_radius(8)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(status.label()).color(fg).strong());
        });
}
