//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `pull`: Fetch translations from a provider into the local files
//! - `push`: Send local translations to one or more providers
//! - `init`: Initialize the transync configuration file

use std::path::PathBuf;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};

use crate::sync::{PullOptions, PushOptions};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Number of `-v` flags given to the command.
    pub fn verbose(&self) -> u8 {
        match &self.command {
            Some(Command::Pull(cmd)) => cmd.common.verbose,
            Some(Command::Push(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => 0,
        }
    }
}

/// Common arguments shared by the sync commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Translations directory (overrides config file)
    #[arg(long, env = "TRANSYNC_TRANSLATIONS_DIR")]
    pub translations_dir: Option<PathBuf>,

    /// Domains to synchronize, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    pub domains: Vec<String>,

    /// Locales to synchronize, comma separated (default: enabled locales)
    #[arg(long, value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct PullCommand {
    /// Provider to pull from, as named in the config file
    pub provider: String,

    /// Replace local messages by the remote ones instead of only adding
    /// missing messages
    #[arg(long)]
    pub force: bool,

    /// Output format of the written files (overrides config file)
    #[arg(long)]
    pub format: Option<String>,

    /// XLIFF version of the written files (overrides config file)
    #[arg(long)]
    pub xliff_version: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PullCommand {
    pub fn options(&self, output_format: &str, xliff_version: &str) -> PullOptions {
        PullOptions {
            provider: self.provider.clone(),
            domains: self.common.domains.clone(),
            locales: self.common.locales.clone(),
            force: self.force,
            output_format: self.format.as_deref().unwrap_or(output_format).to_string(),
            xliff_version: self
                .xliff_version
                .as_deref()
                .unwrap_or(xliff_version)
                .to_string(),
        }
    }
}

#[derive(Debug, Args)]
pub struct PushCommand {
    /// Providers to push to, as named in the config file (default: all)
    pub providers: Vec<String>,

    /// Only send messages the provider does not have yet
    #[arg(long)]
    pub new_only: bool,

    /// Delete remote messages that no longer exist locally
    #[arg(long)]
    pub delete_missing: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PushCommand {
    pub fn options(&self) -> PushOptions {
        PushOptions {
            providers: self.providers.clone(),
            domains: self.common.domains.clone(),
            locales: self.common.locales.clone(),
            new_only: self.new_only,
            delete_missing: self.delete_missing,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pull translations from a provider into the local translation files
    Pull(PullCommand),
    /// Push local translations to translation providers
    Push(PushCommand),
    /// Initialize a new .transyncrc.json configuration file
    Init,
}
