// src/gui/actions/export.rs
use chrono::Local;

use crate::gui::app::App;

/// Export button: write today's CSV into the configured output folder.
pub fn export(app: &mut App) {
    let dir = app.state.options.export.out_dir.clone();
    let today = Local::now().date_naive();

    // Dashboard reports success/failure through notifications itself.
    match app.dash.export(&dir, today) {
        Ok(Some(path)) => logd!("Export: wrote {}", path.display()),
        Ok(None) => {}
        Err(e) => logd!("Export: surfaced error: {}", e),
    }
}
