//! Everything a command needs: resolved locations, loaded settings, and the
//! live bridge wired to WAAPI and the REAPER process.

use std::path::PathBuf;

use anyhow::{Context, Result};

use wrb_bridge::Bridge;
use wrb_core::{BridgePaths, SelectionStore, Settings};
use wrb_reaper::{ProcessLauncher, RenderDirectory, ScriptSet};
use wrb_waapi::{HttpTransport, WaapiClient};

use crate::guard::OperationLock;

pub type LiveBridge = Bridge<WaapiClient<HttpTransport>, ProcessLauncher, RenderDirectory>;

/// Resolve data locations, making a relative `WRB_DATA_DIR` absolute so the
/// file paths handed to Wwise do not depend on its working directory.
pub fn resolve_paths() -> Result<BridgePaths> {
    let paths = BridgePaths::from_env().context("could not determine data directories")?;
    Ok(BridgePaths {
        config_root: absolute(paths.config_root)?,
        local_root: absolute(paths.local_root)?,
    })
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    Ok(cwd.join(path))
}

pub struct AppContext {
    pub paths: BridgePaths,
    pub settings: Settings,
}

impl AppContext {
    pub fn load(paths: BridgePaths) -> Result<Self> {
        paths
            .ensure_dirs()
            .with_context(|| format!("failed to create {}", paths.local_root.display()))?;
        let config = paths.config_path();
        let settings = Settings::load_at(&config)
            .with_context(|| format!("failed to load settings from {}", config.display()))?;
        tracing::debug!(
            exe = %settings.executable_path.display(),
            data = %paths.local_root.display(),
            "settings loaded"
        );
        Ok(Self { paths, settings })
    }

    pub fn store(&self) -> SelectionStore {
        SelectionStore::new(&self.paths)
    }

    pub fn render_dir(&self) -> RenderDirectory {
        RenderDirectory::new(self.paths.render_dir())
    }

    pub fn bridge(&self) -> LiveBridge {
        Bridge::new(
            WaapiClient::new(HttpTransport::from_env()),
            ProcessLauncher,
            self.render_dir(),
            self.store(),
            ScriptSet::from_env(),
        )
    }

    /// Take the operation lock. `None` means another invocation holds it.
    ///
    /// A lock older than the longest render wait for the current manifest is
    /// treated as abandoned.
    pub fn lock(&self) -> Result<Option<OperationLock>> {
        let items = self.store().read().map(|m| m.len()).unwrap_or(0);
        let stale_after = self.render_dir().timeout_for(items);
        OperationLock::try_acquire(&self.paths.lock_path(), stale_after)
    }
}
