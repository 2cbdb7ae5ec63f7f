//! Managed directory roots.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::{Applicable, ResourceChange};
use crate::error::InstallError;

/// A directory tree owned by the installation.
#[derive(Debug, Clone)]
pub struct ManagedDirectory {
    /// Root of the tree.
    pub path: PathBuf,
}

impl ManagedDirectory {
    /// Create a new managed directory resource.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Whether the directory currently exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }
}

impl Applicable for ManagedDirectory {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.exists() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        std::fs::create_dir_all(&self.path).map_err(|source| {
            InstallError::InstallRootCreation {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if !self.exists() {
            return Ok(ResourceChange::Skipped {
                reason: "directory does not exist".to_string(),
            });
        }
        std::fs::remove_dir_all(&self.path)
            .with_context(|| format!("removing {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn apply_creates_nested_root() {
        let dir = tempfile::tempdir().unwrap();
        let res = ManagedDirectory::new(dir.path().join("a/b"));
        assert_eq!(res.apply().unwrap(), ResourceChange::Applied);
        assert!(res.exists());
        assert_eq!(res.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn apply_failure_is_install_root_creation() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "").unwrap();
        let err = ManagedDirectory::new(file.join("sub")).apply().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::InstallRootCreation { .. })
        ));
    }

    #[test]
    fn remove_deletes_whole_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("app");
        std::fs::create_dir_all(root.join("config/nested")).unwrap();
        std::fs::write(root.join("config/nested/x"), "x").unwrap();

        let res = ManagedDirectory::new(root.clone());
        assert_eq!(res.remove().unwrap(), ResourceChange::Applied);
        assert!(!root.exists());
        assert!(matches!(
            res.remove().unwrap(),
            ResourceChange::Skipped { .. }
        ));
    }
}
