use std::path::PathBuf;

use thiserror::Error;

/// Error surface for process launch and render-directory management.
#[derive(Debug, Error)]
pub enum ReaperError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script not found: {path}")]
    ScriptMissing { path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ReaperError {
    ReaperError::Io {
        path: path.into(),
        source,
    }
}
