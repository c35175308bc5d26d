// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Live search box contents
    pub search: String,

    pub window_w: u32,
    pub window_h: u32,

    /// UID waiting for the delete confirmation dialog
    pub pending_delete: Option<String>,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            search: s!(),
            window_w: 1100,
            window_h: 700,
            pending_delete: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
