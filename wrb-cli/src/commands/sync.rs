//! `wrb sync` — render the last selection in REAPER and import it into Wwise.

use std::process::ExitCode;

use anyhow::Result;

use crate::context::AppContext;
use crate::interrupt;

pub fn run(ctx: &AppContext) -> Result<ExitCode> {
    let Some(lock) = ctx.lock()? else {
        return Ok(super::busy());
    };
    let cancel = interrupt::cancel_on_ctrl_c(lock.path());
    let result = ctx.bridge().with_cancel_flag(cancel).modify(&ctx.settings);
    if let Ok(outcome) = &result {
        for task in &outcome.tasks {
            println!("  {} ← {}", task.target_path, task.audio_file.display());
        }
    }
    Ok(super::finish(result, |outcome| outcome.report()))
}
