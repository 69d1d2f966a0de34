//! Single-operation guard.
//!
//! A lock file in the local data directory is created exclusively for the
//! duration of an operation, so a second `wrb open`/`wrb sync` cannot start a
//! render cycle on top of a running one. The file is removed on drop. A lock
//! left by a killed process is recognised by its recorded pid.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use wrb_reaper::process_alive;

#[derive(Debug)]
pub struct OperationLock {
    path: PathBuf,
}

impl OperationLock {
    /// Create the lock at `path`. Returns `Ok(None)` when a live lock exists.
    /// A lock whose holder has exited, or whose mtime is at least
    /// `stale_after` old, is replaced.
    pub fn try_acquire(path: &Path, stale_after: Duration) -> Result<Option<Self>> {
        match create(path) {
            Ok(()) => return Ok(Some(Self::held(path))),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(err) => {
                return Err(err).with_context(|| format!("failed to create {}", path.display()))
            }
        }

        let holder = fs::read_to_string(path).unwrap_or_default();
        if !is_stale(path, &holder, stale_after) {
            tracing::info!(lock = %path.display(), holder = holder.trim(), "operation lock is held");
            return Ok(None);
        }

        tracing::warn!(lock = %path.display(), "replacing abandoned operation lock");
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("failed to remove {}", path.display()))
            }
        }
        match create(path) {
            Ok(()) => Ok(Some(Self::held(path))),
            // Another invocation won the race for the stale lock.
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to create {}", path.display())),
        }
    }

    fn held(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OperationLock {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(lock = %self.path.display(), error = %err, "failed to release lock");
            }
        }
    }
}

fn create(path: &Path) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    writeln!(
        file,
        "pid {} since {}",
        std::process::id(),
        chrono::Utc::now().to_rfc3339()
    )?;
    Ok(())
}

fn is_stale(path: &Path, holder: &str, stale_after: Duration) -> bool {
    if let Some(pid) = holder_pid(holder) {
        if !process_alive(pid) {
            tracing::debug!(pid, "lock holder has exited");
            return true;
        }
    }
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .map_or(true, |age| age >= stale_after)
}

/// The pid written by [`create`]: `pid <n> since <timestamp>`.
fn holder_pid(contents: &str) -> Option<u32> {
    let mut words = contents.split_whitespace();
    words.find(|w| *w == "pid")?;
    words.next()?.parse().ok()
}
