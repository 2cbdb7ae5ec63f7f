//! Stray job output and log files left in a working directory.
use anyhow::{Context as _, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

use super::{Applicable, ResourceChange};

/// File name patterns treated as temporary: scheduler stdout/stderr
/// (`job.o1234`, `job.e1234`) and logs.
pub const TEMP_PATTERNS: [&str; 3] = ["*.o*", "*.e*", "*.log"];

fn temp_globs() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in TEMP_PATTERNS {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid pattern {pattern}"))?);
    }
    builder.build().context("building temp file patterns")
}

/// Files directly inside `dir` whose names match [`TEMP_PATTERNS`], sorted.
///
/// Hidden files never match, so `.env` or `.editorconfig` survive.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn find_temp_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let globs = temp_globs()?;
    let mut found = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_file() && globs.is_match(&name) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// A single temporary file scheduled for deletion.
#[derive(Debug, Clone)]
pub struct TempFile {
    /// File to delete.
    pub path: PathBuf,
}

impl TempFile {
    /// Create a new temp file resource.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Applicable for TempFile {
    fn description(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.remove()
    }

    fn remove(&self) -> Result<ResourceChange> {
        if !self.path.exists() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("deleting {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}
