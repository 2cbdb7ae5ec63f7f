//! Named, ordered tasks that orchestrate resource changes.
pub mod activation;
pub mod context;
pub mod credential;
pub mod deploy;
pub mod guard;
pub mod marker;
pub mod processing;
pub mod profile;
pub mod remove;
pub mod settings;

pub use context::Context;
pub use processing::{
    ProcessOpts, TaskResult, TaskStats, process_resources, process_resources_remove,
};

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task applies to the current run.
    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails; later tasks are not run.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The install sequence, in execution order.
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(guard::CheckExistingInstall),
        Box::new(deploy::DeployFiles),
        Box::new(settings::UpdateSettings),
        Box::new(activation::PatchActivationScript),
        Box::new(profile::ConfigureShellProfile),
        Box::new(credential::ProvisionCredential),
        Box::new(marker::MarkInstalled),
        Box::new(marker::ActivateEnvironment),
    ]
}

/// The uninstall sequence, in execution order.
#[must_use]
pub fn all_uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(remove::RemoveManagedDirectories)]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error after recording it as failed.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::Skipped, Some("not applicable"));
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            return Err(e);
        }
    }
    Ok(())
}

/// Shared helpers for task unit tests.
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub mod test_helpers {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use crate::config::paths::{BENCH_DIR, BUILD_DIR, INSTALL_DIR, PathEntry, PathTable};
    use crate::logging::Logger;

    use super::Context;

    /// `<root>/app`, `<root>/build`, `<root>/bench`.
    #[must_use]
    pub fn sample_paths(root: &Path) -> PathTable {
        PathTable::new(vec![
            PathEntry {
                name: INSTALL_DIR.to_string(),
                path: root.join("app"),
            },
            PathEntry {
                name: BUILD_DIR.to_string(),
                path: root.join("build"),
            },
            PathEntry {
                name: BENCH_DIR.to_string(),
                path: root.join("bench"),
            },
        ])
    }

    /// Build a [`Context`] for `paths`, also returning the [`Logger`] so
    /// tests can inspect recorded task state.
    ///
    /// The data bundle and shell startup file default to `data/` and
    /// `.bashrc` next to the install root.
    #[must_use]
    pub fn make_context(paths: PathTable, dry_run: bool) -> (Context, Arc<Logger>) {
        let base = paths
            .install_dir()
            .parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);
        let log = Arc::new(Logger::new("test"));
        let ctx = Context {
            paths: Arc::new(paths),
            credential: None,
            data_dir: base.join("data"),
            shell_rc: base.join(".bashrc"),
            log: Arc::clone(&log) as Arc<dyn crate::logging::Log>,
            dry_run,
        };
        (ctx, log)
    }

    /// Write a minimal data bundle into `dir`.
    pub fn write_bundle(dir: &Path) {
        for sub in ["config", "templates", "resources", "modulefiles/benchtool"] {
            std::fs::create_dir_all(dir.join(sub)).unwrap();
        }
        std::fs::write(dir.join(".version"), "1.0\n").unwrap();
        std::fs::write(dir.join("README.md"), "# benchtool\n").unwrap();
        std::fs::write(
            dir.join("install.ini"),
            "[paths]\ninstall_dir = /a\nbuild_dir = /b\nbench_dir = /c\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("settings.ini"),
            "[paths]\ninstall_dir =\nbuild_dir =\nbench_dir =\n\n[system]\nscheduler = slurm\n",
        )
        .unwrap();
        std::fs::write(dir.join("config/system.ini"), "[system]\n").unwrap();
        std::fs::write(dir.join("templates/job.template"), "#!/bin/bash\n").unwrap();
        std::fs::write(dir.join("resources/logo.txt"), "bt\n").unwrap();
        std::fs::write(
            dir.join("modulefiles/benchtool/1.0.lua"),
            "local project_dir     = \"\"\nlocal app_dir         = \"\"\nlocal result_dir      = \"\"\nlocal version         = \"\"\n",
        )
        .unwrap();
    }
}
