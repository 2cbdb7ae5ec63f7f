//! Task: point the installed settings file at the resolved paths.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::settings::SettingsFile;

/// Installed settings file name.
pub const SETTINGS_FILE: &str = "settings.ini";

/// Point the installed settings file at the resolved paths.
#[derive(Debug)]
pub struct UpdateSettings;

impl Task for UpdateSettings {
    fn name(&self) -> &'static str {
        "Update settings"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let settings = SettingsFile::new(
            ctx.paths.install_dir().join(SETTINGS_FILE),
            (*ctx.paths).clone(),
        );
        process_resources(
            ctx,
            std::iter::once(settings),
            &ProcessOpts::apply_all("update"),
        )
    }
}
