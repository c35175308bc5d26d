// src/log.rs
//
// Append-only file log. Every line carries the time since process start
// and a level tag; the CLI can additionally mirror lines to stderr.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::config::consts::{LOG_FILE, STORE_DIR};

static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static ECHO: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info  => "INFO",
            Level::Warn  => "WARN",
            Level::Error => "ERROR",
        }
    }
}

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

/// Point the log at `<dir>/rollcall.log`. Only the first call wins.
pub fn init(dir: &Path) {
    let _ = LOG_PATH.set(dir.join(LOG_FILE));
    start();
}

/// Mirror warnings and errors to stderr (CLI).
pub fn set_echo(on: bool) {
    ECHO.store(on, Ordering::Relaxed);
}

fn log_path() -> &'static Path {
    LOG_PATH.get_or_init(|| PathBuf::from(STORE_DIR).join(LOG_FILE))
}

pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Internal logging function
pub fn write_log(level: Level, msg: &str) {
    let elapsed = fmt_elapsed(start().elapsed().as_millis());
    let line = format!("[{elapsed}][{}] {msg}\n", level.tag());

    if ECHO.load(Ordering::Relaxed) && matches!(level, Level::Warn | Level::Error) {
        eprint!("{line}");
    }

    if let Ok(_guard) = LOG_LOCK.lock() {
        let path = log_path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

