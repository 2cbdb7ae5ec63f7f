//! Task: copy the bundle manifest into the install and build roots.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::config::manifest::Manifest;
use crate::resources::deploy::DeployItem;

/// Copy the manifest items from the data bundle into the managed roots.
#[derive(Debug)]
pub struct DeployFiles;

impl Task for DeployFiles {
    fn name(&self) -> &'static str {
        "Deploy files"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let manifest = Manifest::standard(&ctx.paths);
        ctx.log.debug(&format!(
            "deploying {} items from {}",
            manifest.item_count(),
            ctx.data_dir.display()
        ));
        let items = manifest
            .copies(&ctx.data_dir)
            .map(|(source, destination, item)| DeployItem::new(source, destination, item));
        process_resources(ctx, items, &ProcessOpts::apply_all("deploy"))
    }
}
