//! Task: fill in the marker lines of the module activation script.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::config::manifest::MODULE_DIR_ITEM;
use crate::resources::activation::{ActivationScript, find_scripts, version_from};

/// Point the deployed activation script at the resolved paths.
#[derive(Debug)]
pub struct PatchActivationScript;

impl Task for PatchActivationScript {
    fn name(&self) -> &'static str {
        "Patch activation script"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        // Nothing is deployed during a dry run, so look at the bundle instead.
        let module_dir = if ctx.dry_run {
            ctx.data_dir.join(MODULE_DIR_ITEM.trim_end_matches('/'))
        } else {
            ctx.paths.module_dir()
        };
        let scripts = find_scripts(&module_dir)?;
        let Some((first, extra)) = scripts.split_first() else {
            return Ok(TaskResult::Skipped("no activation script".to_string()));
        };
        for other in extra {
            ctx.log
                .warn(&format!("ignoring extra activation script {}", other.display()));
        }
        ctx.log
            .info(&format!("benchtool version {}", version_from(first)));

        let target = if ctx.dry_run {
            ctx.paths.module_dir().join(first.file_name().unwrap_or_default())
        } else {
            first.clone()
        };
        process_resources(
            ctx,
            std::iter::once(ActivationScript::new(target, &ctx.paths)),
            &ProcessOpts::apply_all("patch"),
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::error::InstallError;
    use crate::tasks::test_helpers::{make_context, sample_paths};

    const TEMPLATE: &str = "\
-- benchtool
local project_dir     = \"\"
local app_dir         = \"\"
local result_dir      = \"\"
local version         = \"\"
setenv(\"BT_PROJECT\", project_dir)
";

    #[test]
    fn patches_deployed_script() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), false);
        let module_dir = ctx.paths.module_dir();
        std::fs::create_dir_all(&module_dir).unwrap();
        std::fs::write(module_dir.join("2.1.lua"), TEMPLATE).unwrap();

        let result = PatchActivationScript.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok));

        let content = std::fs::read_to_string(module_dir.join("2.1.lua")).unwrap();
        let app = dir.path().join("app");
        assert!(content.contains(&format!("local project_dir     = \"{}\"", app.display())));
        assert!(content.contains("local version         = \"2.1\""));
        assert!(content.starts_with("-- benchtool\n"));
        assert!(content.ends_with("setenv(\"BT_PROJECT\", project_dir)\n"));
    }

    #[test]
    fn only_first_script_is_patched() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), false);
        let module_dir = ctx.paths.module_dir();
        std::fs::create_dir_all(&module_dir).unwrap();
        std::fs::write(module_dir.join("1.0.lua"), TEMPLATE).unwrap();
        std::fs::write(module_dir.join("2.0.lua"), TEMPLATE).unwrap();

        PatchActivationScript.run(&ctx).unwrap();

        assert_ne!(
            std::fs::read_to_string(module_dir.join("1.0.lua")).unwrap(),
            TEMPLATE
        );
        assert_eq!(
            std::fs::read_to_string(module_dir.join("2.0.lua")).unwrap(),
            TEMPLATE
        );
    }

    #[test]
    fn missing_script_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), false);
        std::fs::create_dir_all(ctx.paths.module_dir()).unwrap();

        let err = PatchActivationScript.run(&ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::ActivationScriptMissing(_))
        ));
    }

    #[test]
    fn dry_run_reads_bundle_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(sample_paths(dir.path()), true);
        let bundle_dir = ctx.data_dir.join("modulefiles/benchtool");
        std::fs::create_dir_all(&bundle_dir).unwrap();
        std::fs::write(bundle_dir.join("1.0.lua"), TEMPLATE).unwrap();

        let result = PatchActivationScript.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert_eq!(
            std::fs::read_to_string(bundle_dir.join("1.0.lua")).unwrap(),
            TEMPLATE
        );
        assert!(!ctx.paths.module_dir().exists());
    }
}
