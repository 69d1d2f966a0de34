//! `wrb open` — hand the Wwise selection to REAPER.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::context::AppContext;
use crate::interrupt;
use crate::prompt::{Answer, TerminalOperator};

/// Arguments for `wrb open`.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Open the last selection for editing without asking.
    #[arg(long, conflicts_with = "no")]
    pub yes: bool,

    /// Never open the last selection for editing.
    #[arg(long)]
    pub no: bool,
}

impl OpenArgs {
    pub fn run(self, ctx: &AppContext) -> Result<ExitCode> {
        let Some(lock) = ctx.lock()? else {
            return Ok(super::busy());
        };
        let operator = TerminalOperator::new(Answer::from_flags(self.yes, self.no));
        let cancel = interrupt::cancel_on_ctrl_c(lock.path());
        let result = ctx.bridge().with_cancel_flag(cancel).open(&ctx.settings, &operator);
        Ok(super::finish(result, |outcome| outcome.report()))
    }
}
