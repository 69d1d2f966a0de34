//! Ctrl-C handling for operations that hold the operation lock.
//!
//! The first interrupt cancels the render wait so the bridge can unwind and
//! release the lock normally. If the process is still around after
//! [`GRACE`], the lock is removed by hand and the process exits.

use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use wrb_reaper::CancelFlag;

pub const GRACE: Duration = Duration::from_secs(2);

/// Exit status for a run ended by Ctrl-C.
const INTERRUPTED: i32 = 130;

/// Spawn a watcher thread and return the flag it sets on Ctrl-C.
pub fn cancel_on_ctrl_c(lock_path: &Path) -> CancelFlag {
    let cancel = CancelFlag::new();
    let flag = cancel.clone();
    let lock_path = lock_path.to_path_buf();

    let spawned = thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracing::warn!(error = %err, "Ctrl-C handling unavailable");
                    return;
                }
            };
            if let Err(err) = runtime.block_on(tokio::signal::ctrl_c()) {
                tracing::warn!(error = %err, "failed to listen for Ctrl-C");
                return;
            }

            tracing::warn!("interrupted, stopping the current operation");
            flag.cancel();
            thread::sleep(GRACE);

            match fs::remove_file(&lock_path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    tracing::warn!(lock = %lock_path.display(), error = %err, "failed to release lock")
                }
            }
            std::process::exit(INTERRUPTED);
        });
    if let Err(err) = spawned {
        tracing::warn!(error = %err, "Ctrl-C handling unavailable");
    }
    cancel
}
