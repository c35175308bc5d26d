// src/export.rs
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::consts::EXPORT_PREFIX;
use crate::csv::to_csv;
use crate::file::write_into_dir;
use crate::model::Snapshot;

/// `attendance_<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("{EXPORT_PREFIX}{}.csv", date.format("%Y-%m-%d"))
}

/// Write the roster as CSV into `dir`. An existing file for the same day
/// is overwritten.
pub fn write_export(dir: &Path, snapshot: &Snapshot, date: NaiveDate) -> std::io::Result<PathBuf> {
    let contents = to_csv(snapshot);
    write_into_dir(dir, &export_filename(date), &contents)
}
