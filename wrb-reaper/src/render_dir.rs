//! Render Directory Watcher.
//!
//! REAPER reports completion by writing `success.flag` into the scratch
//! directory after the rendered `<name>.wav` files. The bridge clears the
//! directory before each cycle, polls for the sentinel with a bound that
//! scales with the workload, and deletes the sentinel as soon as it is seen.
//!
//! [`CompletionChannel`] is the seam: a socket-based handshake could replace
//! [`RenderDirectory`] without touching the orchestrator.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{io_err, ReaperError};

pub const SENTINEL_FILE: &str = "success.flag";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_TIMEOUT_PER_ITEM: Duration = Duration::from_secs(60);

/// How a wait for the workstation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Success,
    TimedOut { waited: Duration },
    Cancelled,
}

/// Cooperative cancellation for [`CompletionChannel::await_completion`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What [`CompletionChannel::prepare`] removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareReport {
    pub removed: usize,
    /// Files that could not be deleted; logged and left behind.
    pub failed: Vec<PathBuf>,
}

/// Hand-off channel between the bridge and the workstation's render step.
pub trait CompletionChannel {
    /// Drop every output of a previous cycle.
    fn prepare(&self) -> Result<PrepareReport, ReaperError>;

    /// Block until the workstation signals completion, the workload-scaled
    /// bound passes, or `cancel` is set. Success consumes the signal.
    fn await_completion(&self, expected_items: usize, cancel: &CancelFlag) -> Completion;

    /// The rendered output named `file_name`, if the workstation wrote it.
    fn rendered_file(&self, file_name: &str) -> Option<PathBuf>;

    /// A completion signal still present after [`prepare`](Self::prepare).
    /// Waiting on top of it would report a success nobody produced.
    fn stale_signal(&self) -> Option<PathBuf>;
}

impl<C: CompletionChannel + ?Sized> CompletionChannel for &C {
    fn prepare(&self) -> Result<PrepareReport, ReaperError> {
        (**self).prepare()
    }

    fn await_completion(&self, expected_items: usize, cancel: &CancelFlag) -> Completion {
        (**self).await_completion(expected_items, cancel)
    }

    fn rendered_file(&self, file_name: &str) -> Option<PathBuf> {
        (**self).rendered_file(file_name)
    }

    fn stale_signal(&self) -> Option<PathBuf> {
        (**self).stale_signal()
    }
}

/// Sentinel-file implementation of [`CompletionChannel`].
#[derive(Debug, Clone)]
pub struct RenderDirectory {
    dir: PathBuf,
    poll_interval: Duration,
    timeout_per_item: Duration,
}

impl RenderDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout_per_item: DEFAULT_TIMEOUT_PER_ITEM,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout_per_item(mut self, timeout: Duration) -> Self {
        self.timeout_per_item = timeout;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sentinel_path(&self) -> PathBuf {
        self.dir.join(SENTINEL_FILE)
    }

    /// `timeout_per_item × (expected_items + 1)`.
    pub fn timeout_for(&self, expected_items: usize) -> Duration {
        let factor = u32::try_from(expected_items.saturating_add(1)).unwrap_or(u32::MAX);
        self.timeout_per_item.saturating_mul(factor)
    }

    fn consume_sentinel(&self) {
        let sentinel = self.sentinel_path();
        if let Err(err) = std::fs::remove_file(&sentinel) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("could not delete {}: {err}", sentinel.display());
            }
        }
    }
}

impl CompletionChannel for RenderDirectory {
    fn prepare(&self) -> Result<PrepareReport, ReaperError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;

        let mut report = PrepareReport::default();
        let entries = std::fs::read_dir(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let path = entry.path();
            match std::fs::remove_file(&path) {
                Ok(()) => report.removed += 1,
                Err(err) => {
                    tracing::warn!("could not delete {}: {err}", path.display());
                    report.failed.push(path);
                }
            }
        }
        if let Some(sentinel) = self.stale_signal() {
            if !report.failed.contains(&sentinel) {
                tracing::warn!("{} is not a removable file", sentinel.display());
                report.failed.push(sentinel);
            }
        }
        tracing::debug!(
            "render dir {} prepared: {} removed, {} left",
            self.dir.display(),
            report.removed,
            report.failed.len()
        );
        Ok(report)
    }

    fn await_completion(&self, expected_items: usize, cancel: &CancelFlag) -> Completion {
        let sentinel = self.sentinel_path();
        let timeout = self.timeout_for(expected_items);
        let started = Instant::now();
        tracing::info!(
            "waiting up to {}s for {}",
            timeout.as_secs(),
            sentinel.display()
        );

        loop {
            if sentinel.is_file() {
                self.consume_sentinel();
                tracing::info!("render finished after {:.1}s", started.elapsed().as_secs_f32());
                return Completion::Success;
            }
            if cancel.is_cancelled() {
                return Completion::Cancelled;
            }
            let waited = started.elapsed();
            if waited >= timeout {
                return Completion::TimedOut { waited };
            }
            thread::sleep(self.poll_interval.min(timeout - waited));
        }
    }

    fn rendered_file(&self, file_name: &str) -> Option<PathBuf> {
        let path = self.dir.join(file_name);
        path.is_file().then_some(path)
    }

    fn stale_signal(&self) -> Option<PathBuf> {
        let sentinel = self.sentinel_path();
        sentinel.symlink_metadata().is_ok().then_some(sentinel)
    }
}
