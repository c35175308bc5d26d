// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn ensure_directory(dir: &Path) -> std::io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Write `contents` to `dir/file_name`, creating `dir` as needed.
/// Returns the final path written to.
pub fn write_into_dir(dir: &Path, file_name: &str, contents: &str) -> std::io::Result<PathBuf> {
    if !dir.as_os_str().is_empty() {
        ensure_directory(dir)?;
    }
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}
