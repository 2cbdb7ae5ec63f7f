//! Installed settings file rewriting.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::fs::write_atomic;
use super::{Applicable, ResourceChange};
use crate::config::ini::IniDocument;
use crate::config::paths::PathTable;

/// Set every key of `doc` that names a path in `paths`, in every section.
///
/// Returns the number of lines changed.  Keys that do not name a path are
/// left exactly as read.
///
/// # Examples
///
/// ```
/// use benchtool_installer::config::ini::IniDocument;
/// use benchtool_installer::config::paths::{PathEntry, PathTable};
/// use benchtool_installer::resources::settings::apply_paths;
/// use std::path::PathBuf;
///
/// let table = PathTable::new(vec![PathEntry {
///     name: "install_dir".into(),
///     path: PathBuf::from("/tmp/x/app"),
/// }]);
/// let mut doc = IniDocument::parse("[paths]\ninstall_dir = TBD\nmode = fast\n").unwrap();
/// assert_eq!(apply_paths(&mut doc, &table), 1);
/// assert_eq!(doc.render(), "[paths]\ninstall_dir = /tmp/x/app\nmode = fast\n");
/// ```
pub fn apply_paths(doc: &mut IniDocument, paths: &PathTable) -> usize {
    let sections = doc.sections().to_vec();
    let mut changed = 0;
    for section in &sections {
        for entry in paths {
            if doc.set(section, &entry.name, &entry.path.display().to_string()) {
                changed += 1;
            }
        }
    }
    changed
}

/// The installed `settings.ini` with path keys pointing at the install.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    /// Location of the installed settings file.
    pub path: PathBuf,
    /// Resolved paths to write.
    pub paths: PathTable,
}

impl SettingsFile {
    /// Create a new settings file resource.
    #[must_use]
    pub const fn new(path: PathBuf, paths: PathTable) -> Self {
        Self { path, paths }
    }

    /// Rewrite the file in place and return the number of keys set.
    ///
    /// The file is left untouched when no key names a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or replaced.
    pub fn update(&self) -> Result<usize> {
        let mut doc = IniDocument::load(&self.path)
            .with_context(|| format!("updating settings {}", self.path.display()))?;
        let changed = apply_paths(&mut doc, &self.paths);
        if changed > 0 {
            write_atomic(&self.path, &doc.render())?;
        }
        Ok(changed)
    }
}

impl Applicable for SettingsFile {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.update()? {
            0 => Ok(ResourceChange::AlreadyCorrect),
            keys => {
                tracing::info!("{keys} path keys set");
                Ok(ResourceChange::Applied)
            }
        }
    }
}
