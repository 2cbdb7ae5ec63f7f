//! Manifest item deployment.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::fs::copy_dir_recursive;
use super::{Applicable, ResourceChange};
use crate::error::InstallError;

/// One bundle item copied into a destination root.
#[derive(Debug, Clone)]
pub struct DeployItem {
    /// Item inside the data bundle.
    pub source: PathBuf,
    /// Destination root (e.g. the install root).
    pub destination: PathBuf,
    /// Item name relative to the bundle, as listed in the manifest.
    pub item: String,
}

impl DeployItem {
    /// Create a new deploy item.
    #[must_use]
    pub fn new(source: PathBuf, destination: &Path, item: &str) -> Self {
        Self {
            source,
            destination: destination.to_path_buf(),
            item: item.trim_end_matches('/').to_string(),
        }
    }

    /// Where a directory item lands.
    #[must_use]
    pub fn tree_target(&self) -> PathBuf {
        self.destination.join(&self.item)
    }

    /// Copy `source` as a single file into the destination root.
    fn copy_file(&self) -> Result<()> {
        let name = self
            .source
            .file_name()
            .with_context(|| format!("no file name in {}", self.source.display()))?;
        std::fs::create_dir_all(&self.destination)
            .with_context(|| format!("creating {}", self.destination.display()))?;
        std::fs::copy(&self.source, self.destination.join(name))
            .with_context(|| format!("copying {}", self.source.display()))?;
        Ok(())
    }
}

impl Applicable for DeployItem {
    fn description(&self) -> String {
        format!("{} -> {}", self.item, self.destination.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if copy_dir_recursive(&self.source, &self.tree_target()).is_ok() {
            return Ok(ResourceChange::Applied);
        }
        self.copy_file().map_err(|e| {
            e.context(InstallError::DeploymentFailed {
                source_path: self.source.clone(),
                destination: self.destination.clone(),
            })
        })?;
        Ok(ResourceChange::Applied)
    }
}
