//! Report formatting and printing utilities.
//!
//! Separate from the sync engine so transync can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::sync::SyncSummary;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub fn print_pull(summary: &SyncSummary, force: bool) {
    print_pull_to(summary, force, &mut io::stdout().lock());
}

pub fn print_pull_to<W: Write>(summary: &SyncSummary, force: bool, writer: &mut W) {
    if summary.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Local translations are already up to date with \"{}\"",
                summary.provider
            )
            .green()
        );
        return;
    }

    let verb = if force { "Mirrored" } else { "Pulled" };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} from \"{}\" (locales: {}; domains: {})",
            verb,
            plural(summary.messages, "message", "messages"),
            summary.provider,
            list(&summary.locales),
            list(&summary.domains)
        )
        .green()
    );
}

pub fn print_push(summaries: &[SyncSummary]) {
    print_push_to(summaries, &mut io::stdout().lock());
}

pub fn print_push_to<W: Write>(summaries: &[SyncSummary], writer: &mut W) {
    for summary in summaries {
        let mut line = format!(
            "Pushed {} to \"{}\" (locales: {}; domains: {})",
            plural(summary.messages, "message", "messages"),
            summary.provider,
            list(&summary.locales),
            list(&summary.domains)
        );
        if summary.deleted > 0 {
            line.push_str(&format!(
                ", deleted {}",
                plural(summary.deleted, "message", "messages")
            ));
        }
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), line.green());
    }
}

/// Print a failed command with its error chain.
pub fn print_error(err: &anyhow::Error) {
    print_error_to(err, &mut io::stderr().lock());
}

pub fn print_error_to<W: Write>(err: &anyhow::Error, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), "error:".bold().red());
    for cause in err.chain() {
        let _ = writeln!(writer, "  {}", cause);
    }
}
