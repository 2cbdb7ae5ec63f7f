//! Temp file cleanup for benchmark working directories.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::confirm::{CLEANUP_DELAY, ConfirmationWindow};
use crate::logging::Logger;
use crate::resources::temp_files::{TempFile, find_temp_files};
use crate::resources::{Applicable, ResourceChange};

/// Run the clean command in the working directory.
///
/// # Errors
///
/// Returns an error if the working directory cannot be read or the user
/// cancels the confirmation window.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let cwd = std::env::current_dir().context("reading working directory")?;
    clean_dir(&cwd, global, log)
}

/// List, confirm, and delete the temp files directly inside `dir`.
///
/// # Errors
///
/// See [`run`].
pub fn clean_dir(dir: &Path, global: &GlobalOpts, log: &Logger) -> Result<()> {
    log.stage("Cleaning up temp files");
    let files = find_temp_files(dir)?;
    if files.is_empty() {
        log.info("No temp files found.");
        return Ok(());
    }

    log.info("Found the following files to delete:");
    for file in &files {
        log.info(&format!("  {}", file.display()));
    }

    if global.dry_run {
        log.dry_run(&format!("would delete {} files", files.len()));
        return Ok(());
    }

    ConfirmationWindow::new("clean", CLEANUP_DELAY, global.delay, global.yes).confirm(log)?;
    let deleted = delete_all(&files, log);
    log.info(&format!("{deleted} of {} files cleaned", files.len()));
    Ok(())
}

/// Delete the temp files directly inside `dir` without confirmation.
///
/// Used on the fatal-error path; failures are only logged.
pub fn clean_on_fail(dir: &Path, log: &Logger) {
    match find_temp_files(dir) {
        Ok(files) if files.is_empty() => log.debug("no temp files to clean"),
        Ok(files) => {
            let deleted = delete_all(&files, log);
            log.info(&format!("{deleted} temp files cleaned"));
        }
        Err(e) => log.warn(&format!("temp file cleanup failed: {e:#}")),
    }
}

/// Delete each file, continuing past failures; returns how many went.
fn delete_all(files: &[PathBuf], log: &Logger) -> usize {
    let mut deleted = 0;
    for path in files {
        match TempFile::new(path.clone()).remove() {
            Ok(ResourceChange::Applied) => {
                log.debug(&format!("deleted {}", path.display()));
                deleted += 1;
            }
            Ok(_) => {}
            Err(e) => log.warn(&format!("error cleaning {}: {e:#}", path.display())),
        }
    }
    deleted
}
