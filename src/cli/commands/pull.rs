use anyhow::{Context, Result};
use tracing::info;

use super::super::{args::PullCommand, exit_status::ExitStatus, report};
use super::context::SyncContext;

pub fn pull(cmd: PullCommand) -> Result<ExitStatus> {
    let ctx = SyncContext::new(&cmd.common)?;
    let options = cmd.options(&ctx.config.output_format, &ctx.config.xliff_version);
    info!(
        provider = options.provider.as_str(),
        dir = %ctx.translations_dir.display(),
        "pulling translations"
    );

    let summary = ctx
        .synchronizer
        .pull(&options)
        .with_context(|| format!("Failed to pull translations from \"{}\"", options.provider))?;

    report::print_pull(&summary, options.force);
    Ok(ExitStatus::Success)
}
