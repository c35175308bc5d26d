// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub cache: CacheOptions,
    pub export: ExportOptions,
}

/// How rows are split into fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Plain comma split, no quoting (sheet-compatible).
    #[default]
    Naive,
    /// Double-quoted fields may contain commas.
    Quoted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub url: String,
    pub poll_interval: Duration,
    /// None = wait forever, like the browser fetch.
    pub timeout: Option<Duration>,
    pub split: SplitMode,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            url: s!(SHEET_URL),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            timeout: None,
            split: SplitMode::Naive,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    pub dir: PathBuf,
    pub key: String,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(STORE_DIR),
            key: s!(CACHE_KEY),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR) }
    }
}
