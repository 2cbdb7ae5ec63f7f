//! `benchtool-installer` command-line entry point.
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use benchtool_installer::cli::{Cli, Command};
use benchtool_installer::commands;
use benchtool_installer::logging::{self, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    if matches!(args.command, Command::Version) {
        commands::version::run();
        return ExitCode::SUCCESS;
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let log = Arc::new(Logger::new(args.command.name()));

    let result = match &args.command {
        Command::Install(opts) => commands::install::run(&args.global, opts, &log),
        Command::Uninstall => commands::uninstall::run(&args.global, &log),
        Command::Clean => commands::clean::run(&args.global, &log),
        Command::Remove(opts) => commands::remove::run(&args.global, opts, &log),
        Command::Version => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            if args.global.clean_on_fail {
                match std::env::current_dir() {
                    Ok(cwd) => commands::clean::clean_on_fail(&cwd, &log),
                    Err(err) => log.warn(&format!("temp file cleanup failed: {err}")),
                }
            }
            log.error("Quitting");
            ExitCode::FAILURE
        }
    }
}
