//! Task: delete the managed directories of an installation.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources_remove};
use crate::resources::directory::ManagedDirectory;

/// Delete every managed directory of an installation.
#[derive(Debug)]
pub struct RemoveManagedDirectories;

impl Task for RemoveManagedDirectories {
    fn name(&self) -> &'static str {
        "Remove managed directories"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let dirs = ctx
            .paths
            .iter()
            .map(|entry| ManagedDirectory::new(entry.path.clone()));
        process_resources_remove(ctx, dirs, &ProcessOpts::apply_all("remove"))
    }
}
