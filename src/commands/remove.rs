//! Removal of a single built application and its module files.
use anyhow::{Context as _, Result};
use std::path::{Component, Path, PathBuf};

use crate::cli::{GlobalOpts, RemoveOpts};
use crate::confirm::{CLEANUP_DELAY, ConfirmationWindow};
use crate::error::InstallError;
use crate::logging::Logger;
use crate::resources::Applicable;
use crate::resources::directory::ManagedDirectory;

/// Default applications root, relative to the working directory.
const DEFAULT_APPS_ROOT: &str = "build";

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if the code is malformed, the user cancels, or the
/// application directory cannot be deleted.
pub fn run(global: &GlobalOpts, opts: &RemoveOpts, log: &Logger) -> Result<()> {
    let apps_root = match &opts.apps_root {
        Some(root) => root.clone(),
        None => std::env::current_dir()
            .context("reading working directory")?
            .join(DEFAULT_APPS_ROOT),
    };
    remove_application(&opts.code, &apps_root, global, log)
}

/// Relative path of an application code such as `system/gcc/hpl/2.3`.
///
/// # Errors
///
/// Returns an error if the code is empty or contains anything other than
/// plain path segments.
pub fn code_path(code: &str) -> Result<PathBuf> {
    let trimmed = code.trim_matches('/');
    let path = PathBuf::from(trimmed);
    let plain = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if trimmed.is_empty() || !plain {
        anyhow::bail!("invalid application code '{code}'");
    }
    Ok(path)
}

/// Delete `<apps_root>/<code>` and `<apps_root>/modulefiles/<code>`.
///
/// # Errors
///
/// See [`run`].
pub fn remove_application(
    code: &str,
    apps_root: &Path,
    global: &GlobalOpts,
    log: &Logger,
) -> Result<()> {
    let relative = code_path(code)?;
    let app = ManagedDirectory::new(apps_root.join(&relative));
    let module = ManagedDirectory::new(apps_root.join("modulefiles").join(&relative));

    if !app.exists() {
        log.info(&format!("No application found in {}", app.path.display()));
        return Ok(());
    }

    log.warn(&format!(
        "removing application installed in {}",
        app.path.display()
    ));
    if global.dry_run {
        log.dry_run(&format!("would remove {}", app.path.display()));
        log.dry_run(&format!("would remove {}", module.path.display()));
        return Ok(());
    }

    ConfirmationWindow::new("remove", CLEANUP_DELAY, global.delay, global.yes).confirm(log)?;
    app.remove()?;
    log.info("Application removed.");

    if module.exists() {
        module.remove()?;
    } else {
        log.warn(&InstallError::ModuleDirectoryMissing(module.path).to_string());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn yes() -> GlobalOpts {
        GlobalOpts {
            yes: true,
            ..GlobalOpts::default()
        }
    }

    #[test]
    fn code_path_accepts_nested_codes() {
        assert_eq!(
            code_path("/system/gcc/hpl/2.3/").unwrap(),
            PathBuf::from("system/gcc/hpl/2.3")
        );
    }

    #[test]
    fn code_path_rejects_escapes() {
        assert!(code_path("").is_err());
        assert!(code_path("/").is_err());
        assert!(code_path("system/../../etc").is_err());
        assert!(code_path("./hpl").is_err());
    }

    #[test]
    fn removes_application_and_module() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("sys/gcc/hpl/2.3");
        let module = dir.path().join("modulefiles/sys/gcc/hpl/2.3");
        std::fs::create_dir_all(app.join("bin")).unwrap();
        std::fs::create_dir_all(&module).unwrap();
        std::fs::create_dir_all(dir.path().join("sys/gcc/hpl/2.2")).unwrap();
        let log = Logger::new("test");

        remove_application("sys/gcc/hpl/2.3", dir.path(), &yes(), &log).unwrap();

        assert!(!app.exists());
        assert!(!module.exists());
        assert!(dir.path().join("sys/gcc/hpl/2.2").is_dir());
    }

    #[test]
    fn missing_module_directory_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("sys/gcc/hpl/2.3");
        std::fs::create_dir_all(&app).unwrap();
        let log = Logger::new("test");

        remove_application("sys/gcc/hpl/2.3", dir.path(), &yes(), &log).unwrap();
        assert!(!app.exists());
    }

    #[test]
    fn absent_application_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("modulefiles/sys/x");
        std::fs::create_dir_all(&module).unwrap();
        let log = Logger::new("test");

        remove_application("sys/x", dir.path(), &yes(), &log).unwrap();
        assert!(module.is_dir());
    }

    #[test]
    fn dry_run_keeps_application() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("sys/x");
        std::fs::create_dir_all(&app).unwrap();
        let log = Logger::new("test");
        let global = GlobalOpts {
            dry_run: true,
            ..GlobalOpts::default()
        };

        remove_application("sys/x", dir.path(), &global, &log).unwrap();
        assert!(app.is_dir());
    }
}
