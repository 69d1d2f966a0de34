//! Bridge Orchestrator — the three operator-facing operations.
//!
//! ## `open`
//! 1. REAPER executable and import script exist.
//! 2. Capture the Wwise selection (persisting it when non-empty).
//! 3. Empty selection → fall back to the manifest, offering to edit it.
//! 4. Launch REAPER with the import script.
//!
//! ## `modify` (render + import cycle)
//! 1. REAPER is running; a non-empty manifest exists; executable and render
//!    script exist. Nothing is touched before all of these hold.
//! 2. Clear the scratch directory (a surviving sentinel aborts the cycle),
//!    launch the render script.
//! 3. Resolve original sources by path (diagnostic only).
//! 4. Wait for the sentinel; a timeout aborts the cycle.
//! 5. Reconcile `<name>.wav` files against the manifest and import.
//!
//! ## `check_format`
//! REAPER is running → launch the show-config script.

use std::path::PathBuf;

use wrb_core::{ImportTask, Report, SelectedObject, SelectionStore, Settings};
use wrb_reaper::{CancelFlag, Completion, CompletionChannel, Script, ScriptSet, Workstation};
use wrb_waapi::{AuthoringTool, KeyField};

use crate::error::{BridgeError, Precondition};
use crate::operator::Operator;
use crate::reconcile::reconcile;

/// Where the objects handed to REAPER by `open` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOff {
    /// A fresh Wwise selection, now persisted.
    Selection,
    /// Nothing selected; the previous manifest was reused.
    History,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOutcome {
    pub source: HandOff,
    pub handed_off: usize,
}

impl OpenOutcome {
    pub fn report(&self) -> Report {
        match self.source {
            HandOff::Selection => Report::info(format!(
                "Opening REAPER. Logged {} item(s).",
                self.handed_off
            )),
            HandOff::History => Report::info(format!(
                "Opening REAPER with last selection ({} item(s)).",
                self.handed_off
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub manifest_len: usize,
    pub tasks: Vec<ImportTask>,
    pub imported: usize,
}

impl SyncOutcome {
    /// Warn when nothing matched; otherwise report `imported/queued`, where a
    /// short count is informational.
    pub fn report(&self) -> Report {
        if self.tasks.is_empty() {
            Report::warn(format!(
                "REAPER finished, but no matching WAV files were found for the {} selected object(s).",
                self.manifest_len
            ))
        } else {
            Report::info(format!(
                "Sync complete. Imported {}/{} files.",
                self.imported,
                self.tasks.len()
            ))
        }
    }
}

/// The orchestrator, generic over each external collaborator.
pub struct Bridge<A, W, C> {
    tool: A,
    workstation: W,
    channel: C,
    store: SelectionStore,
    scripts: ScriptSet,
    cancel: CancelFlag,
}

impl<A, W, C> Bridge<A, W, C>
where
    A: AuthoringTool,
    W: Workstation,
    C: CompletionChannel,
{
    pub fn new(tool: A, workstation: W, channel: C, store: SelectionStore, scripts: ScriptSet) -> Self {
        Self {
            tool,
            workstation,
            channel,
            store,
            scripts,
            cancel: CancelFlag::new(),
        }
    }

    /// Share a cancel flag with whoever may want to stop a render wait.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Capture the Wwise selection and, if it is non-empty, make it the new
    /// manifest. An empty selection leaves the previous manifest in place.
    pub fn capture_selection(&self) -> Result<Vec<SelectedObject>, BridgeError> {
        let selection = self.tool.capture_selection()?;
        if !selection.is_empty() {
            self.store.write(&selection)?;
            tracing::info!("captured {} sound(s) from Wwise", selection.len());
        }
        Ok(selection)
    }

    /// Hand the current selection (or the last one) to REAPER.
    pub fn open(
        &self,
        settings: &Settings,
        operator: &dyn Operator,
    ) -> Result<OpenOutcome, BridgeError> {
        let executable = require_executable(settings)?;
        let script = self.scripts.require(Script::Import)?;

        let selection = self.capture_selection()?;
        let outcome = if selection.is_empty() {
            let history = self.store.read()?;
            if history.is_empty() {
                return Err(Precondition::NothingSelected.into());
            }
            if operator.confirm(
                "No selection",
                "No object selected. Open last selection file for modification?",
            ) {
                if let Err(err) = operator.open_for_edit(self.store.jsonl_path()) {
                    tracing::warn!("could not open manifest for editing: {err}");
                }
            }
            OpenOutcome {
                source: HandOff::History,
                handed_off: history.len(),
            }
        } else {
            OpenOutcome {
                source: HandOff::Selection,
                handed_off: selection.len(),
            }
        };

        self.workstation.launch(&executable, &script)?;
        Ok(outcome)
    }

    /// Render the manifest's objects in REAPER and import the results.
    pub fn modify(&self, settings: &Settings) -> Result<SyncOutcome, BridgeError> {
        if !self.workstation.is_running(&settings.executable_path) {
            return Err(Precondition::WorkstationNotRunning.into());
        }
        if !self.store.exists() {
            return Err(Precondition::NoHistory.into());
        }
        let manifest = self.store.read()?;
        if manifest.is_empty() {
            return Err(Precondition::EmptyHistory.into());
        }
        let executable = require_executable(settings)?;
        let script = self.scripts.require(Script::Render)?;

        let prepared = self.channel.prepare()?;
        if !prepared.failed.is_empty() {
            tracing::warn!(
                "{} stale file(s) could not be removed from the render directory",
                prepared.failed.len()
            );
        }
        if let Some(signal) = self.channel.stale_signal() {
            return Err(Precondition::StaleSignal(signal).into());
        }
        self.workstation.launch(&executable, &script)?;

        self.log_original_sources(&manifest);

        match self.channel.await_completion(manifest.len(), &self.cancel) {
            Completion::Success => {}
            Completion::TimedOut { waited } => {
                return Err(BridgeError::Timeout {
                    waited,
                    expected: manifest.len(),
                })
            }
            Completion::Cancelled => return Err(BridgeError::Cancelled),
        }

        let tasks = reconcile(&manifest, &self.channel);
        tracing::info!(
            "{} of {} object(s) have a rendered file",
            tasks.len(),
            manifest.len()
        );
        let imported = if tasks.is_empty() {
            0
        } else {
            self.tool.import_results(&tasks)
        };
        Ok(SyncOutcome {
            manifest_len: manifest.len(),
            tasks,
            imported,
        })
    }

    /// Ask REAPER to print its render configuration.
    pub fn check_format(&self, settings: &Settings) -> Result<Report, BridgeError> {
        if !self.workstation.is_running(&settings.executable_path) {
            return Err(Precondition::WorkstationNotRunning.into());
        }
        let script = self.scripts.require(Script::ShowConfig)?;
        self.workstation.launch(&settings.executable_path, &script)?;
        Ok(Report::info("Render config shown in the REAPER console."))
    }

    // The lookup result does not gate reconciliation; it is logged so a
    // mismatch between Wwise and the manifest is visible after the fact.
    fn log_original_sources(&self, manifest: &[SelectedObject]) {
        let paths: Vec<String> = manifest
            .iter()
            .filter(|o| !o.path.is_empty())
            .map(|o| o.path.to_string())
            .collect();
        match self.tool.resolve_original_source_paths(&paths, KeyField::Path) {
            Ok(sources) => {
                for (path, source) in &sources {
                    tracing::debug!("original source {path} -> {source}");
                }
                let missing = paths.len().saturating_sub(sources.len());
                if missing > 0 {
                    tracing::info!("{missing} object(s) have no original source in Wwise");
                }
            }
            Err(err) => tracing::warn!("original source lookup failed: {err}"),
        }
    }
}

fn require_executable(settings: &Settings) -> Result<PathBuf, BridgeError> {
    if settings.executable_exists() {
        Ok(settings.executable_path.clone())
    } else {
        Err(Precondition::ExecutableMissing(settings.executable_path.clone()).into())
    }
}
