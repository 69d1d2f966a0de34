//! Settings document.
//!
//! A small JSON object stored at `config.json`:
//!
//! ```json
//! {
//!   "executablePath": "C:\\Program Files\\REAPER (x64)\\reaper.exe",
//!   "renderFormatToken": "ZXZhdxgAAQ=="
//! }
//! ```
//!
//! Absent keys take their defaults. Unknown keys fail the load; the
//! document is never silently migrated.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};

/// REAPER `RENDER_FORMAT` token for 24-bit WAV.
pub const DEFAULT_RENDER_FORMAT: &str = "ZXZhdxgAAQ==";

#[cfg(windows)]
pub const DEFAULT_REAPER_PATH: &str = r"C:\Program Files\REAPER (x64)\reaper.exe";
#[cfg(target_os = "macos")]
pub const DEFAULT_REAPER_PATH: &str = "/Applications/REAPER.app/Contents/MacOS/REAPER";
#[cfg(not(any(windows, target_os = "macos")))]
pub const DEFAULT_REAPER_PATH: &str = "/opt/REAPER/reaper";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Path to the REAPER executable.
    #[serde(rename = "executablePath", alias = "reaper_path")]
    pub executable_path: PathBuf,
    /// Opaque render configuration token, read by the REAPER-side scripts.
    #[serde(rename = "renderFormatToken", alias = "reaper_render_format")]
    pub render_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            executable_path: PathBuf::from(DEFAULT_REAPER_PATH),
            render_format: DEFAULT_RENDER_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, returning defaults when the file is absent.
    ///
    /// Returns [`CoreError::SettingsParse`] if the document is malformed or
    /// carries an unknown key.
    pub fn load_at(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            tracing::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        serde_json::from_str(&contents).map_err(|source| CoreError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings atomically (`.tmp` sibling, then rename), indented.
    pub fn save_at(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(dir) = path.parent() {
            crate::paths::create_dir(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(path, e));
        }
        Ok(())
    }

    pub fn executable_exists(&self) -> bool {
        self.executable_path.is_file()
    }

    pub fn reset_render_format(&mut self) {
        self.render_format = DEFAULT_RENDER_FORMAT.to_string();
    }
}
