//! On-disk layout.
//!
//! ```text
//! <roaming data>/WwiseReaperBridge/
//!   config.json                 (settings document)
//! <local data>/WwiseReaperBridge/
//!   last_selected.jsonl         (machine manifest)
//!   last_selected.txt           (human manifest)
//!   renders/                    (scratch directory shared with REAPER)
//!   logs/wrb.log
//!   wrb.lock                    (in-flight operation guard)
//! ```
//!
//! Setting `WRB_DATA_DIR` collapses both roots into one directory. Tests
//! always build a [`BridgePaths`] with [`BridgePaths::at`].

use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};

pub const APP_NAME: &str = "WwiseReaperBridge";
pub const DATA_DIR_ENV: &str = "WRB_DATA_DIR";

pub const CONFIG_FILE: &str = "config.json";
pub const MANIFEST_JSONL: &str = "last_selected.jsonl";
pub const MANIFEST_TXT: &str = "last_selected.txt";
pub const RENDER_DIR: &str = "renders";
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "wrb.log";
pub const LOCK_FILE: &str = "wrb.lock";

/// Resolved roots for everything the bridge persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgePaths {
    /// Roaming root; holds the settings document.
    pub config_root: PathBuf,
    /// Machine-local root; holds manifests, renders and logs.
    pub local_root: PathBuf,
}

impl BridgePaths {
    /// Single-root layout, used by tests and by `WRB_DATA_DIR`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_root: root.clone(),
            local_root: root,
        }
    }

    /// Layout from the environment: `WRB_DATA_DIR` if set, else the
    /// per-user roaming and local data directories.
    pub fn from_env() -> Result<Self, CoreError> {
        if let Some(root) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(root)));
        }
        let roaming = dirs::data_dir().ok_or(CoreError::DataDirNotFound)?;
        let local = dirs::data_local_dir().ok_or(CoreError::DataDirNotFound)?;
        Ok(Self {
            config_root: roaming.join(APP_NAME),
            local_root: local.join(APP_NAME),
        })
    }

    /// Create both roots and the scratch directory if absent.
    pub fn ensure_dirs(&self) -> Result<(), CoreError> {
        for dir in [&self.config_root, &self.local_root, &self.render_dir()] {
            create_dir(dir)?;
        }
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_root.join(CONFIG_FILE)
    }

    pub fn manifest_jsonl(&self) -> PathBuf {
        self.local_root.join(MANIFEST_JSONL)
    }

    pub fn manifest_txt(&self) -> PathBuf {
        self.local_root.join(MANIFEST_TXT)
    }

    pub fn render_dir(&self) -> PathBuf {
        self.local_root.join(RENDER_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.local_root.join(LOG_DIR)
    }

    pub fn log_path(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.local_root.join(LOCK_FILE)
    }
}

pub(crate) fn create_dir(dir: &Path) -> Result<(), CoreError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    Ok(())
}
