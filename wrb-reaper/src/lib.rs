//! REAPER side of the bridge: launching the workstation with a script and
//! waiting for its render hand-off.
//!
//! - [`launcher`] — [`Workstation`] trait, [`ProcessLauncher`], process-list liveness
//! - [`scripts`] — the Lua scripts REAPER is launched with
//! - [`render_dir`] — [`CompletionChannel`] trait and the sentinel-file [`RenderDirectory`]

mod error;
pub mod launcher;
pub mod render_dir;
pub mod scripts;

pub use error::ReaperError;
pub use launcher::{open_in_default_app, process_alive, ProcessLauncher, Workstation};
pub use render_dir::{CancelFlag, Completion, CompletionChannel, PrepareReport, RenderDirectory};
pub use scripts::{Script, ScriptSet};
