//! Tasks: write the success marker and report activation steps.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::{Context, Task, TaskResult};

/// Empty file whose presence marks a completed install.
pub const INSTALLED_MARKER: &str = ".installed";

/// Write the installation marker.
#[derive(Debug)]
pub struct MarkInstalled;

impl Task for MarkInstalled {
    fn name(&self) -> &'static str {
        "Mark installation complete"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let marker = ctx.paths.install_dir().join(INSTALLED_MARKER);
        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("would create {}", marker.display()));
            return Ok(TaskResult::DryRun);
        }
        std::fs::write(&marker, "")
            .with_context(|| format!("writing {}", marker.display()))?;
        ctx.log.debug(&format!("created {}", marker.display()));
        Ok(TaskResult::Ok)
    }
}

/// `MODULEPATH` with the benchtool module directory appended.
///
/// # Examples
///
/// ```
/// use benchtool_installer::tasks::marker::extended_module_path;
/// use std::path::Path;
///
/// let dir = Path::new("/opt/build/modulefiles");
/// assert_eq!(extended_module_path(Some("/usr/share/modules"), dir),
///            "/usr/share/modules:/opt/build/modulefiles");
/// assert_eq!(extended_module_path(None, dir), "/opt/build/modulefiles");
/// ```
#[must_use]
pub fn extended_module_path(current: Option<&str>, modulefiles_dir: &Path) -> String {
    match current.filter(|c| !c.is_empty()) {
        Some(current) => format!("{current}:{}", modulefiles_dir.display()),
        None => modulefiles_dir.display().to_string(),
    }
}

/// Tell the user how to load the freshly installed module.
///
/// The running process cannot change the calling shell's environment, so
/// this only reports the extended search path and the follow-up commands.
#[derive(Debug)]
pub struct ActivateEnvironment;

impl Task for ActivateEnvironment {
    fn name(&self) -> &'static str {
        "Activate environment"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let current = std::env::var("MODULEPATH").ok();
        let module_path = extended_module_path(current.as_deref(), &ctx.paths.modulefiles_dir());
        ctx.log.debug(&format!("MODULEPATH={module_path}"));
        for (name, value) in ctx.paths.env_vars() {
            ctx.log.debug(&format!("{name}={value}"));
        }
        ctx.log
            .info("run 'source ~/.bashrc' then 'ml benchtool' to start using benchtool");
        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{make_context, sample_paths};

    #[test]
    fn marker_is_empty_file_in_install_root() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), false);
        std::fs::create_dir_all(ctx.paths.install_dir()).unwrap();

        MarkInstalled.run(&ctx).unwrap();

        let marker = dir.path().join("app/.installed");
        assert_eq!(std::fs::read(marker).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn dry_run_writes_no_marker() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), true);

        let result = MarkInstalled.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert!(!dir.path().join("app/.installed").exists());
    }

    #[test]
    fn empty_module_path_is_replaced() {
        let dir = Path::new("/opt/build/modulefiles");
        assert_eq!(extended_module_path(Some(""), dir), "/opt/build/modulefiles");
    }

    #[test]
    fn activation_never_fails() {
        let (ctx, _log) = make_context(sample_paths(Path::new("/tmp/x")), false);
        assert!(matches!(
            ActivateEnvironment.run(&ctx).unwrap(),
            TaskResult::Ok
        ));
    }
}
