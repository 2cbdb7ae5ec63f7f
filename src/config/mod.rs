//! Install configuration: INI parsing, variable expansion and path resolution.
pub mod expand;
pub mod ini;
pub mod manifest;
pub mod paths;

use anyhow::{Context as _, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::InstallError;
use ini::IniDocument;
use paths::{PathEntry, PathTable, REQUIRED_KEYS};

/// Section holding the managed paths.
pub const PATHS_SECTION: &str = "paths";
/// Section holding the optional credential path.
pub const KEY_SECTION: &str = "key";
/// Default configuration file name inside the data bundle.
pub const DEFAULT_CONFIG: &str = "install.ini";

/// Fully resolved install configuration.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// File the configuration was read from.
    pub source: PathBuf,
    /// Managed paths, fully expanded.
    pub paths: PathTable,
    /// Optional private key to copy into the install tree.
    pub credential: Option<PathBuf>,
}

impl InstallConfig {
    /// Load the configuration, expanding references against the process
    /// environment.
    ///
    /// Uses `user_path` when given, otherwise `<data_dir>/install.ini`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user-supplied file does not exist, the file
    /// cannot be parsed, a required key is missing, or a reference cannot be
    /// resolved.
    pub fn load(user_path: Option<&Path>, data_dir: &Path) -> Result<Self> {
        Self::load_with(user_path, data_dir, |name| std::env::var(name).ok())
    }

    /// Like [`load`](Self::load) with an injected environment lookup.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with<F>(user_path: Option<&Path>, data_dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match user_path {
            Some(p) if p.is_file() => p.to_path_buf(),
            Some(p) => return Err(InstallError::ConfigNotFound(p.to_path_buf()).into()),
            None => data_dir.join(DEFAULT_CONFIG),
        };
        Self::from_file_with(&path, env)
    }

    /// Read and resolve a specific configuration (or installed settings) file.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_file_with<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !path.is_file() {
            return Err(InstallError::ConfigNotFound(path.to_path_buf()).into());
        }
        let doc = IniDocument::load(path)
            .map_err(|e| InstallError::InvalidConfig {
                file: path.display().to_string(),
                message: format!("{e:#}"),
            })
            .context("loading install configuration")?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
        let (paths, credential) = resolve(&doc, &file_name, env)?;
        Ok(Self {
            source: path.to_path_buf(),
            paths,
            credential,
        })
    }
}

/// Validate and expand the `[paths]` and `[key]` sections of `doc`.
///
/// Each path value is expanded against the entries resolved before it in
/// the same section, then against `env`.  Nothing touches the filesystem.
///
/// # Errors
///
/// Returns [`InstallError::ConfigIncomplete`] if a required key is missing
/// and [`InstallError::UnresolvedVariable`] if a `$` reference survives
/// expansion.
pub fn resolve<F>(
    doc: &IniDocument,
    file_name: &str,
    env: F,
) -> Result<(PathTable, Option<PathBuf>), InstallError>
where
    F: Fn(&str) -> Option<String>,
{
    for key in REQUIRED_KEYS {
        if doc.get(PATHS_SECTION, key).is_none() {
            return Err(InstallError::ConfigIncomplete {
                file: file_name.to_string(),
                key: key.to_string(),
            });
        }
    }

    let mut resolved: HashMap<String, String> = HashMap::new();
    let mut entries = Vec::new();
    for (key, raw) in doc.section_entries(PATHS_SECTION) {
        let value = expand::expand_vars(raw, |name| {
            resolved.get(name).cloned().or_else(|| env(name))
        });
        if expand::has_unresolved(&value) {
            return Err(InstallError::UnresolvedVariable {
                key: key.to_string(),
                value,
            });
        }
        resolved.insert(key.to_string(), value.clone());
        entries.push(PathEntry {
            name: key.to_string(),
            path: PathBuf::from(value),
        });
    }

    let credential = doc
        .get(KEY_SECTION, "key")
        .filter(|v| !v.is_empty())
        .map(|raw| {
            PathBuf::from(expand::expand_vars(raw, |name| {
                resolved.get(name).cloned().or_else(|| env(name))
            }))
        });

    Ok((PathTable::new(entries), credential))
}
