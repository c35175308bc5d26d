// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use rollcall::{config::state::AppState, gui, log, loge, logf};

fn main() {
    let state = AppState::default();
    log::init(&state.options.cache.dir);
    logf!("GUI: start");

    if let Err(e) = gui::run(state) {
        loge!("GUI failed: {}", e);
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
