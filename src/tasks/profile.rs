//! Task: hook the environment module into the shell startup file.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::profile::ShellProfile;

/// Load the benchtool module from the user's shell startup file.
#[derive(Debug)]
pub struct ConfigureShellProfile;

impl Task for ConfigureShellProfile {
    fn name(&self) -> &'static str {
        "Configure shell profile"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let profile = ShellProfile::new(ctx.shell_rc.clone(), ctx.paths.modulefiles_dir());
        if ctx.dry_run && profile.is_integrated()? {
            ctx.log.info(&format!(
                "{} already loads benchtool",
                ctx.shell_rc.display()
            ));
            return Ok(TaskResult::DryRun);
        }
        process_resources(
            ctx,
            std::iter::once(profile),
            &ProcessOpts::apply_all("append to"),
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{make_context, sample_paths};

    #[test]
    fn appends_block_once() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), false);
        std::fs::write(&ctx.shell_rc, "alias ll='ls -l'").unwrap();

        ConfigureShellProfile.run(&ctx).unwrap();
        let once = std::fs::read_to_string(&ctx.shell_rc).unwrap();
        ConfigureShellProfile.run(&ctx).unwrap();
        let twice = std::fs::read_to_string(&ctx.shell_rc).unwrap();

        assert_eq!(once, twice);
        let expected = format!(
            "alias ll='ls -l'\n# BENCHTOOL\nexport MODULEPATH=$MODULEPATH:{}\nml benchtool\n",
            dir.path().join("build/modulefiles").display()
        );
        assert_eq!(once, expected);
    }

    #[test]
    fn creates_missing_startup_file() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), false);

        ConfigureShellProfile.run(&ctx).unwrap();
        let content = std::fs::read_to_string(&ctx.shell_rc).unwrap();
        assert!(content.starts_with("# BENCHTOOL\n"));
    }

    #[test]
    fn dry_run_leaves_startup_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), true);

        let result = ConfigureShellProfile.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert!(!ctx.shell_rc.exists());
    }
}
