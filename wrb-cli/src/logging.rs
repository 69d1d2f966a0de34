//! Tracing setup: stderr plus an appended `logs/wrb.log`, rotated by size
//! before the subscriber opens it.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wrb_core::BridgePaths;

use crate::log_rotation::{self, Rotation};

/// Install the global subscriber. `verbose` forces `debug` over `RUST_LOG`.
///
/// A log file that cannot be opened only disables the file output.
pub fn init(paths: &BridgePaths, verbose: bool) {
    let log_path = paths.log_path();
    let rotation = log_rotation::rotate_log(&log_path);
    let (file, file_err) = match open_log(&log_path) {
        Ok(file) => (Some(file), None),
        Err(err) => (None, Some(err)),
    };

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let stderr_layer = fmt::layer().with_target(false).with_writer(io::stderr);
    let file_layer = file.map(|f| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(f))
    });
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match rotation {
        Rotation::Rotated => tracing::debug!(path = %log_path.display(), "log file rotated"),
        Rotation::Kept => {}
        Rotation::Failed(err) => {
            tracing::warn!(path = %log_path.display(), error = %err, "log rotation failed")
        }
    }
    if let Some(err) = file_err {
        tracing::warn!(path = %log_path.display(), error = %err, "log file unavailable");
    }
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
