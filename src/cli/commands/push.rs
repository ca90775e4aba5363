use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::PushCommand, exit_status::ExitStatus, report};
use super::context::SyncContext;

pub fn push(cmd: PushCommand) -> Result<ExitStatus> {
    let ctx = SyncContext::new(&cmd.common)?;
    if ctx.synchronizer.providers().is_empty() {
        eprintln!(
            "{} no provider is configured; add one under \"providers\" in the config file",
            "warning:".bold().yellow()
        );
        return Ok(ExitStatus::Failure);
    }

    let summaries = ctx
        .synchronizer
        .push(&cmd.options())
        .context("Failed to push translations")?;

    report::print_push(&summaries);
    Ok(ExitStatus::Success)
}
