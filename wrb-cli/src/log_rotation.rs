//! Size-based rotation for `wrb.log`.
//!
//! Runs once per invocation, before the subscriber opens the file:
//!   wrb.log → wrb.log.1 → wrb.log.2 → … → wrb.log.5 (dropped)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Rotate once the live log reaches 10 MiB.
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated copies kept beside the live log.
pub const MAX_ROTATED_FILES: usize = 5;

/// Outcome of [`rotate_log`], reported once tracing is installed.
#[derive(Debug)]
pub enum Rotation {
    Rotated,
    Kept,
    Failed(io::Error),
}

/// Rotate `log_path` with the default limits. Never fails the caller.
pub fn rotate_log(log_path: &Path) -> Rotation {
    match rotate_if_needed(log_path, MAX_LOG_BYTES, MAX_ROTATED_FILES) {
        Ok(true) => Rotation::Rotated,
        Ok(false) => Rotation::Kept,
        Err(err) => Rotation::Failed(err),
    }
}

/// Shift `<log>.n` to `<log>.n+1` (dropping `<log>.max_files`) and move the
/// live log to `<log>.1` when it is at least `max_bytes` long.
///
/// Returns whether a rotation happened. A missing log is not an error; the
/// caller recreates it on open.
pub fn rotate_if_needed(log_path: &Path, max_bytes: u64, max_files: usize) -> io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    if size < max_bytes || max_files == 0 {
        return Ok(false);
    }

    remove_if_present(&numbered_path(log_path, max_files))?;
    for n in (1..max_files).rev() {
        let from = numbered_path(log_path, n);
        if from.exists() {
            fs::rename(&from, numbered_path(log_path, n + 1))?;
        }
    }
    fs::rename(log_path, numbered_path(log_path, 1))?;
    Ok(true)
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

/// `wrb.log` + 2 → `wrb.log.2`.
fn numbered_path(base: &Path, n: usize) -> PathBuf {
    let mut name = base.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{n}"));
    base.with_file_name(name)
}
