//! Domain types shared by every bridge crate.
//!
//! A [`SelectedObject`] is captured from Wwise once per cycle and never
//! mutated afterwards; the manifest, the reconciliation step and the import
//! call all read the same value.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque Wwise object identifier (a GUID string such as `{1A2B…}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Hierarchical Wwise object path, e.g. `\Actor-Mixer Hierarchy\Default Work Unit\Hit`.
///
/// This is the join key between the manifest and the import call: unlike the
/// id it is stable across every supported Wwise version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectPath(pub String);

impl ObjectPath {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ObjectPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ObjectPath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One object from the Wwise selection, as persisted in the manifest.
///
/// Unknown keys are rejected so a record written by a different tool shape
/// is treated as malformed instead of being half-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectedObject {
    pub id: ObjectId,
    pub name: String,
    pub path: ObjectPath,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(
        rename = "sourcePath",
        alias = "source_path",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_path: Option<String>,
}

impl SelectedObject {
    /// File name REAPER is expected to render this object to.
    pub fn render_file_name(&self) -> String {
        format!("{}.wav", self.name)
    }

    /// `path|sourcePath-or-empty` — the human-readable manifest line.
    pub fn manifest_line(&self) -> String {
        format!("{}|{}", self.path, self.source_path.as_deref().unwrap_or(""))
    }
}

/// A rendered file to be imported onto an existing Wwise object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportTask {
    #[serde(rename = "objectPath")]
    pub target_path: ObjectPath,
    #[serde(rename = "audioFile")]
    pub audio_file: PathBuf,
}

// ---------------------------------------------------------------------------
// Operator-facing outcome
// ---------------------------------------------------------------------------

/// Severity tier attached to everything shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Result of one bridge operation, ready to show to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
}

impl Report {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
