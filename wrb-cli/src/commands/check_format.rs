//! `wrb check-format` — print REAPER's render configuration in its console.

use std::process::ExitCode;

use anyhow::Result;

use crate::context::AppContext;
use crate::interrupt;

pub fn run(ctx: &AppContext) -> Result<ExitCode> {
    let Some(lock) = ctx.lock()? else {
        return Ok(super::busy());
    };
    let cancel = interrupt::cancel_on_ctrl_c(lock.path());
    let result = ctx.bridge().with_cancel_flag(cancel).check_format(&ctx.settings);
    Ok(super::finish(result, |report| report.clone()))
}
