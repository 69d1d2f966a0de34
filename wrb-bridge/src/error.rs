//! Error types for wrb-bridge.
//!
//! Each variant knows its [`Severity`] and the message the operator sees.
//! Underlying transport faults stay in the `Display`/log output only.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use wrb_core::{CoreError, Report, Severity};
use wrb_reaper::ReaperError;
use wrb_waapi::WaapiError;

/// Something that must hold before an operation may have any side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    ExecutableMissing(PathBuf),
    ScriptMissing(PathBuf),
    WorkstationNotRunning,
    NoHistory,
    EmptyHistory,
    /// Nothing selected in Wwise and no manifest to fall back to.
    NothingSelected,
    /// A completion signal from an earlier cycle survived the scratch reset.
    StaleSignal(PathBuf),
}

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Wwise could not be reached at all.
    #[error("Wwise is unreachable: {0}")]
    Connection(#[source] WaapiError),

    #[error("precondition failed: {0:?}")]
    Precondition(Precondition),

    /// REAPER did not write the sentinel within the scaled bound.
    #[error("render timed out after {waited:?} ({expected} item(s) expected)")]
    Timeout { waited: Duration, expected: usize },

    #[error("render wait cancelled")]
    Cancelled,

    /// Wwise answered with a fault.
    #[error("WAAPI error: {0}")]
    Remote(#[source] WaapiError),

    #[error("manifest error: {0}")]
    Manifest(#[from] CoreError),

    #[error("workstation error: {0}")]
    Workstation(#[source] ReaperError),
}

impl From<WaapiError> for BridgeError {
    fn from(err: WaapiError) -> Self {
        if err.is_connection() {
            BridgeError::Connection(err)
        } else {
            BridgeError::Remote(err)
        }
    }
}

impl From<ReaperError> for BridgeError {
    fn from(err: ReaperError) -> Self {
        match err {
            ReaperError::ScriptMissing { path } => {
                BridgeError::Precondition(Precondition::ScriptMissing(path))
            }
            other => BridgeError::Workstation(other),
        }
    }
}

impl From<Precondition> for BridgeError {
    fn from(p: Precondition) -> Self {
        BridgeError::Precondition(p)
    }
}

impl BridgeError {
    pub fn severity(&self) -> Severity {
        match self {
            BridgeError::Precondition(Precondition::EmptyHistory)
            | BridgeError::Precondition(Precondition::NothingSelected)
            | BridgeError::Cancelled => Severity::Warn,
            _ => Severity::Error,
        }
    }

    /// Operator-facing message. Never contains a raw transport fault.
    pub fn operator_message(&self) -> String {
        match self {
            BridgeError::Connection(_) => {
                "Could not connect to Wwise. Is it running with WAAPI enabled?".to_string()
            }
            BridgeError::Precondition(p) => match p {
                Precondition::ExecutableMissing(path) => {
                    format!("REAPER executable not found: {}", path.display())
                }
                Precondition::ScriptMissing(path) => {
                    format!("REAPER script not found: {}", path.display())
                }
                Precondition::WorkstationNotRunning => {
                    "REAPER is not running. Please open REAPER and the project first.".to_string()
                }
                Precondition::NoHistory => {
                    "No selection history found. Use 'open' first.".to_string()
                }
                Precondition::EmptyHistory => "Selection history is empty.".to_string(),
                Precondition::NothingSelected => {
                    "No objects selected and no history found.".to_string()
                }
                Precondition::StaleSignal(path) => format!(
                    "A leftover render signal at {} could not be removed. Delete it and try again.",
                    path.display()
                ),
            },
            BridgeError::Timeout { waited, .. } => format!(
                "Timeout: REAPER script did not finish within {}s.",
                waited.as_secs()
            ),
            BridgeError::Cancelled => "Stopped waiting for REAPER.".to_string(),
            BridgeError::Remote(_) => {
                "Wwise rejected the request. See the log for details.".to_string()
            }
            BridgeError::Manifest(CoreError::Io { path, .. }) => {
                format!("Could not write selection files at {}.", path.display())
            }
            BridgeError::Manifest(CoreError::SettingsParse { path, .. }) => {
                format!("Settings file {} is invalid.", path.display())
            }
            BridgeError::Manifest(_) => "Could not save the selection.".to_string(),
            BridgeError::Workstation(ReaperError::Launch { program, .. }) => {
                format!("Could not start {}.", program.display())
            }
            BridgeError::Workstation(_) => {
                "REAPER hand-off failed. See the log for details.".to_string()
            }
        }
    }

    pub fn report(&self) -> Report {
        Report {
            severity: self.severity(),
            message: self.operator_message(),
        }
    }
}
