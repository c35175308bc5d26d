// src/gui/actions/rows.rs
use crate::gui::app::App;

/// Per-row buttons in the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowAction {
    Edit(String),
    Delete(String),
}

pub fn row_action(app: &mut App, action: RowAction) {
    match action {
        RowAction::Edit(uid) => {
            if let Err(e) = app.dash.edit(&uid) {
                logd!("Edit: uid={} → {}", uid, e);
            }
        }
        RowAction::Delete(uid) => {
            // Nothing happens until the dialog is answered.
            logd!("UI: Delete requested uid={}", uid);
            app.state.gui.pending_delete = Some(uid);
        }
    }
}

/// Answer from the confirmation dialog.
pub fn confirm_delete(app: &mut App, confirmed: bool) {
    let Some(uid) = app.state.gui.pending_delete.take() else { return };
    if confirmed {
        app.dash.delete(&uid);
        app.refresh_view();
    } else {
        logd!("UI: Delete cancelled uid={}", uid);
    }
}
