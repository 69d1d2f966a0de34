//! Wwise–REAPER bridge core library — domain types, settings, selection manifest.
//!
//! Public API surface:
//! - [`types`] — selected objects, import tasks, operator reports
//! - [`settings`] — the persisted settings document
//! - [`manifest`] — the [`SelectionStore`] (machine + human manifest files)
//! - [`paths`] — on-disk layout rooted at [`BridgePaths`]
//! - [`error`] — [`CoreError`]

pub mod error;
pub mod manifest;
pub mod paths;
pub mod settings;
pub mod types;

pub use error::CoreError;
pub use manifest::SelectionStore;
pub use paths::BridgePaths;
pub use settings::Settings;
pub use types::{ImportTask, ObjectId, ObjectPath, Report, SelectedObject, Severity};
