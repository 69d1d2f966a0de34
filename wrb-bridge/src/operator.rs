//! The human at the controls.

use std::path::Path;

use wrb_reaper::ReaperError;

/// Interaction the orchestrator may need mid-operation.
pub trait Operator {
    /// Ask a yes/no question.
    fn confirm(&self, title: &str, question: &str) -> bool;

    /// Open `path` for manual editing. Does not wait for the editor.
    fn open_for_edit(&self, path: &Path) -> Result<(), ReaperError>;
}
