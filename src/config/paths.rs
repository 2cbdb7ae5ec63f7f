//! Resolved install paths.
use std::path::{Path, PathBuf};

/// Logical name of the install root.
pub const INSTALL_DIR: &str = "install_dir";
/// Logical name of the application build root (holds `modulefiles/`).
pub const BUILD_DIR: &str = "build_dir";
/// Logical name of the benchmark results root.
pub const BENCH_DIR: &str = "bench_dir";

/// Keys every configuration must define in `[paths]`.
pub const REQUIRED_KEYS: [&str; 3] = [INSTALL_DIR, BUILD_DIR, BENCH_DIR];

/// A logical name mapped to a fully expanded filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Key as written in the `[paths]` section.
    pub name: String,
    /// Expanded path; contains no variable references.
    pub path: PathBuf,
}

/// Ordered, read-only mapping of logical names to resolved paths.
///
/// Built once by [`resolve`](super::resolve)
/// and shared with every installation step.  Entries keep the order of the
/// `[paths]` section.
///
/// # Examples
///
/// ```
/// use benchtool_installer::config::paths::{PathEntry, PathTable};
/// use std::path::PathBuf;
///
/// let table = PathTable::new(vec![
///     PathEntry { name: "install_dir".into(), path: PathBuf::from("/tmp/x/app") },
///     PathEntry { name: "build_dir".into(), path: PathBuf::from("/tmp/x/build") },
///     PathEntry { name: "bench_dir".into(), path: PathBuf::from("/tmp/x/bench") },
/// ]);
/// assert_eq!(table.install_dir(), PathBuf::from("/tmp/x/app"));
/// assert_eq!(table.get("bench_dir"), Some(PathBuf::from("/tmp/x/bench").as_path()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    entries: Vec<PathEntry>,
}

impl PathTable {
    /// Build a table from resolved entries.
    #[must_use]
    pub const fn new(entries: Vec<PathEntry>) -> Self {
        Self { entries }
    }

    /// Look up a path by logical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.path.as_path())
    }

    /// Install root.
    #[must_use]
    pub fn install_dir(&self) -> PathBuf {
        self.required(INSTALL_DIR)
    }

    /// Application build root.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.required(BUILD_DIR)
    }

    /// Benchmark results root.
    #[must_use]
    pub fn bench_dir(&self) -> PathBuf {
        self.required(BENCH_DIR)
    }

    /// Directory holding environment-module files (`<build_dir>/modulefiles`).
    #[must_use]
    pub fn modulefiles_dir(&self) -> PathBuf {
        self.build_dir().join("modulefiles")
    }

    /// Directory holding the benchtool activation script.
    #[must_use]
    pub fn module_dir(&self) -> PathBuf {
        self.modulefiles_dir().join("benchtool")
    }

    /// Iterate over entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name/value pairs for the environment of child processes.
    #[must_use]
    pub fn env_vars(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.path.display().to_string()))
            .collect()
    }

    /// Required keys are validated during resolution, so a miss here yields
    /// an empty path rather than a panic.
    fn required(&self, name: &str) -> PathBuf {
        self.get(name).map(Path::to_path_buf).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a PathTable {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
