//! Subcommand orchestration.
pub mod clean;
pub mod install;
pub mod remove;
pub mod uninstall;
pub mod version;

use anyhow::Result;

use crate::logging::{Logger, TaskStatus};
use crate::tasks::{self, Context, Task};

/// Execute tasks in order, stopping at the first failure, then print the
/// summary.
///
/// Tasks after a failure are recorded as not run.
///
/// # Errors
///
/// Returns the first task error, annotated with the task name.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    let tasks: Vec<&dyn Task> = tasks.into_iter().collect();
    for (index, task) in tasks.iter().enumerate() {
        if let Err(e) = tasks::execute(*task, ctx) {
            for rest in tasks.iter().skip(index + 1) {
                log.record_task(rest.name(), TaskStatus::NotRun, None);
            }
            log.print_summary();
            return Err(e.context(format!("{} failed", task.name())));
        }
    }

    log.print_summary();
    Ok(())
}

/// Version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("BENCHTOOL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
