//! Lua scripts REAPER is launched with. Their content is owned by the
//! REAPER side; the bridge only picks which one runs.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ReaperError;

pub const SCRIPTS_DIR_ENV: &str = "WRB_SCRIPTS_DIR";
const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Build a REAPER session from the persisted selection.
    Import,
    /// Render every track to `<name>.wav` in the scratch directory, then
    /// write `success.flag`.
    Render,
    /// Print the current render format token to the REAPER console.
    ShowConfig,
}

impl Script {
    pub fn file_name(self) -> &'static str {
        match self {
            Script::Import => "wrb_open_wwiseobj_in_reaper.lua",
            Script::Render => "wrb_export_tracks.lua",
            Script::ShowConfig => "wrb_show_render_format.lua",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::Import => write!(f, "import"),
            Script::Render => write!(f, "render"),
            Script::ShowConfig => write!(f, "show-config"),
        }
    }
}

/// Directory holding the bridge's Lua scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSet {
    dir: PathBuf,
}

impl ScriptSet {
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `WRB_SCRIPTS_DIR`, else `assets/` next to the running binary.
    pub fn from_env() -> Self {
        if let Some(dir) = std::env::var_os(SCRIPTS_DIR_ENV).filter(|v| !v.is_empty()) {
            return Self::at(PathBuf::from(dir));
        }
        let base = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        Self::at(base.join(ASSETS_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, script: Script) -> PathBuf {
        self.dir.join(script.file_name())
    }

    /// Path of `script`, failing if the file is not there.
    pub fn require(&self, script: Script) -> Result<PathBuf, ReaperError> {
        let path = self.path(script);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ReaperError::ScriptMissing { path })
        }
    }
}
