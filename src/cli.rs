//! Command-line interface definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the benchtool installer.
#[derive(Parser, Debug)]
#[command(
    name = "benchtool-installer",
    about = "Install, uninstall and clean up the benchtool application",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the bundled data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Skip the confirmation window before destructive actions
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Seconds to wait before destructive actions
    #[arg(long, global = true, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Delete temp files in the working directory if the command fails
    #[arg(long, global = true)]
    pub clean_on_fail: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install benchtool and integrate it with the shell
    Install(InstallOpts),
    /// Remove an active benchtool installation
    Uninstall,
    /// Delete job output and log files in the working directory
    Clean,
    /// Remove an installed application and its module file
    Remove(RemoveOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Uninstall => "uninstall",
            Self::Clean => "clean",
            Self::Remove(_) => "remove",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Configuration file (defaults to the bundled install.ini)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shell startup file to integrate with (defaults to ~/.bashrc)
    #[arg(long)]
    pub shell_rc: Option<PathBuf>,
}

/// Options for the `remove` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RemoveOpts {
    /// Application path, e.g. system/compiler/app/version
    pub code: String,

    /// Directory holding applications and their module files
    #[arg(long)]
    pub apps_root: Option<PathBuf>,
}
