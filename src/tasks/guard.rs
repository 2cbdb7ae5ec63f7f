//! Task: refuse to install over an existing installation.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::error::InstallError;
use crate::resources::directory::ManagedDirectory;

/// Refuse to install over an existing installation, then create the
/// install root.
#[derive(Debug)]
pub struct CheckExistingInstall;

impl Task for CheckExistingInstall {
    fn name(&self) -> &'static str {
        "Check for existing installation"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if let Some(entry) = ctx.paths.iter().find(|e| e.path.is_dir()) {
            ctx.log.debug(&format!("{} exists", entry.name));
            return Err(InstallError::AlreadyInstalled(entry.path.clone()).into());
        }
        ctx.log
            .debug(&format!("{} managed paths are free", ctx.paths.len()));

        process_resources(
            ctx,
            std::iter::once(ManagedDirectory::new(ctx.paths.install_dir())),
            &ProcessOpts::apply_all("create"),
        )
    }
}
