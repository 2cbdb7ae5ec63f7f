//! Environment-module activation script patching.
//!
//! The bundled module file carries four marker lines that point the module
//! at the install.  Patching is a pure transform over the file's lines; the
//! result replaces the original atomically.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::fs::write_atomic;
use super::{Applicable, ResourceChange};
use crate::config::paths::PathTable;
use crate::error::InstallError;

/// Column width that marker names are padded to before `=`.
const MARKER_WIDTH: usize = 22;

/// Extension of activation scripts.
const SCRIPT_EXTENSION: &str = "lua";

/// Values substituted into the four marker lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerValues {
    /// Install root (`project_dir`).
    pub project_dir: String,
    /// Application build root (`app_dir`).
    pub app_dir: String,
    /// Benchmark results root (`result_dir`).
    pub result_dir: String,
    /// Version derived from the script name (`version`).
    pub version: String,
}

impl MarkerValues {
    /// Marker values for `paths` and `version`.
    #[must_use]
    pub fn new(paths: &PathTable, version: &str) -> Self {
        Self {
            project_dir: paths.install_dir().display().to_string(),
            app_dir: paths.build_dir().display().to_string(),
            result_dir: paths.bench_dir().display().to_string(),
            version: version.to_string(),
        }
    }

    fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("project_dir", self.project_dir.as_str()),
            ("app_dir", self.app_dir.as_str()),
            ("result_dir", self.result_dir.as_str()),
            ("version", self.version.as_str()),
        ]
    }
}

/// Name of the marker variable declared on `line`, if any.
///
/// A marker line starts (after indentation) with `local <name>` followed by
/// whitespace or `=`.
fn marker_name<'a>(line: &str, values: &'a MarkerValues) -> Option<(&'static str, &'a str)> {
    let rest = line.trim_start().strip_prefix("local")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    values.pairs().into_iter().find(|(name, _)| {
        rest.strip_prefix(name)
            .is_some_and(|tail| tail.starts_with(|c: char| c.is_whitespace() || c == '='))
    })
}

/// Format a replacement marker line.
fn marker_line(name: &str, value: &str) -> String {
    format!("local {name:<width$}= \"{value}\"", width = MARKER_WIDTH - 6)
}

/// Replace the marker lines of `content`.
///
/// Every other line is returned unchanged, in order, with its original line
/// ending.  Returns the new content and the number of lines replaced.
///
/// # Examples
///
/// ```
/// use benchtool_installer::resources::activation::{MarkerValues, patch_lines};
///
/// let values = MarkerValues {
///     project_dir: "/opt/app".into(),
///     app_dir: "/opt/build".into(),
///     result_dir: "/opt/bench".into(),
///     version: "1.0".into(),
/// };
/// let (out, n) = patch_lines("-- header\nlocal version = \"\"\n", &values);
/// assert_eq!(n, 1);
/// assert_eq!(out, "-- header\nlocal version         = \"1.0\"\n");
/// ```
#[must_use]
pub fn patch_lines(content: &str, values: &MarkerValues) -> (String, usize) {
    let mut out = String::with_capacity(content.len());
    let mut replaced = 0;
    for raw in content.split_inclusive('\n') {
        let (body, eol) = raw
            .strip_suffix("\r\n")
            .map(|b| (b, "\r\n"))
            .or_else(|| raw.strip_suffix('\n').map(|b| (b, "\n")))
            .unwrap_or((raw, ""));
        if let Some((name, value)) = marker_name(body, values) {
            out.push_str(&marker_line(name, value));
            out.push_str(eol);
            replaced += 1;
        } else {
            out.push_str(raw);
        }
    }
    (out, replaced)
}

/// Version string of an activation script: its file name minus the final
/// suffix (`1.2.lua` → `1.2`).
#[must_use]
pub fn version_from(script: &Path) -> String {
    script
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// All activation scripts in `module_dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`InstallError::ActivationScriptMissing`] if the directory cannot
/// be read or holds no script.
pub fn find_scripts(module_dir: &Path) -> Result<Vec<PathBuf>, InstallError> {
    let missing = || InstallError::ActivationScriptMissing(module_dir.to_path_buf());
    let mut scripts: Vec<PathBuf> = std::fs::read_dir(module_dir)
        .map_err(|_| missing())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == SCRIPT_EXTENSION))
        .collect();
    if scripts.is_empty() {
        return Err(missing());
    }
    scripts.sort();
    Ok(scripts)
}

/// An installed activation script whose marker lines point at the install.
#[derive(Debug, Clone)]
pub struct ActivationScript {
    /// Script to patch.
    pub path: PathBuf,
    /// Values written into the marker lines.
    pub values: MarkerValues,
}

impl ActivationScript {
    /// Create a resource for `path`, deriving the version from its name.
    #[must_use]
    pub fn new(path: PathBuf, paths: &PathTable) -> Self {
        let values = MarkerValues::new(paths, &version_from(&path));
        Self { path, values }
    }
}

impl Applicable for ActivationScript {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading activation script {}", self.path.display()))?;
        let (patched, replaced) = patch_lines(&content, &self.values);
        if replaced == 0 {
            return Ok(ResourceChange::Skipped {
                reason: "no marker lines found".to_string(),
            });
        }
        if patched == content {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        write_atomic(&self.path, &patched)?;
        Ok(ResourceChange::Applied)
    }
}
