//! Uninstall command implementation.
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::config::InstallConfig;
use crate::confirm::{ConfirmationWindow, UNINSTALL_DELAY};
use crate::error::InstallError;
use crate::logging::{Log, Logger};
use crate::tasks::settings::SETTINGS_FILE;
use crate::tasks::{self, Context};

/// Variable set by the benchtool module; names the install root.
pub const ACTIVE_ENV: &str = "BT_PROJECT";

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if the benchtool environment is not active, the
/// installed settings cannot be resolved, the user cancels, or a directory
/// cannot be removed.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    execute(global, log, |name| std::env::var(name).ok())
}

/// Like [`run`] with an injected environment lookup.
///
/// # Errors
///
/// See [`run`].
pub fn execute<F>(global: &GlobalOpts, log: &Arc<Logger>, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let project = env(ACTIVE_ENV)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| InstallError::EnvironmentNotActive(ACTIVE_ENV.to_string()))?;

    log.info(&format!("project directory = {}", project.display()));
    log.warn("deleting all applications, results and project data");

    log.stage("Resolving installed settings");
    let config = InstallConfig::from_file_with(&project.join(SETTINGS_FILE), &env)?;
    for entry in &config.paths {
        log.info(&format!("{} will be removed", entry.path.display()));
    }

    if !global.dry_run {
        ConfirmationWindow::new("uninstall", UNINSTALL_DELAY, global.delay, global.yes)
            .confirm(&**log)?;
    }

    let shell_rc = super::install::default_shell_rc(&env).unwrap_or_default();
    let ctx = Context::new(
        &config,
        project,
        shell_rc,
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
    );
    let all_tasks = tasks::all_uninstall_tasks();
    super::run_tasks_to_completion(all_tasks.iter().map(Box::as_ref), &ctx, log)?;

    if !global.dry_run {
        log.info("benchtool uninstalled; remove the BENCHTOOL block from your shell profile");
    }
    Ok(())
}
