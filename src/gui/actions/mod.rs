// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{sync, export, rows}.

mod export;  // src/gui/actions/export.rs
mod rows;    // src/gui/actions/rows.rs
mod sync;    // src/gui/actions/sync.rs

pub use export::export;
pub use rows::{RowAction, confirm_delete, row_action};
pub use sync::{apply_finished, refresh, start_sync, tick};
