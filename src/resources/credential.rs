//! Private key provisioning into the install tree.
use anyhow::Result;
use std::path::PathBuf;

use super::{Applicable, ResourceChange};
use crate::error::InstallError;

/// A credential file copied (never moved) into `<install_dir>/auth/`.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Configured key file.
    pub source: PathBuf,
    /// Destination directory (`<install_dir>/auth`).
    pub auth_dir: PathBuf,
}

impl Credential {
    /// Create a new credential resource.
    #[must_use]
    pub const fn new(source: PathBuf, auth_dir: PathBuf) -> Self {
        Self { source, auth_dir }
    }

    /// Where the key lands inside the install tree.
    #[must_use]
    pub fn target(&self) -> Option<PathBuf> {
        self.source.file_name().map(|n| self.auth_dir.join(n))
    }
}

impl Applicable for Credential {
    fn description(&self) -> String {
        self.source.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        if !self.source.is_file() {
            return Ok(ResourceChange::Skipped {
                reason: format!("credential {} not found", self.source.display()),
            });
        }
        let failed = |reason: String| InstallError::CredentialCopyFailed {
            path: self.source.clone(),
            reason,
        };
        let target = self
            .target()
            .ok_or_else(|| failed("path has no file name".to_string()))?;
        std::fs::create_dir_all(&self.auth_dir).map_err(|e| failed(e.to_string()))?;
        std::fs::copy(&self.source, &target).map_err(|e| failed(e.to_string()))?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn copies_into_auth_dir() {
        let home = tempfile::tempdir().unwrap();
        let install = tempfile::tempdir().unwrap();
        let key = home.path().join("id_rsa");
        std::fs::write(&key, "PRIVATE").unwrap();

        let res = Credential::new(key.clone(), install.path().join("auth"));
        assert_eq!(res.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(
            std::fs::read_to_string(install.path().join("auth/id_rsa")).unwrap(),
            "PRIVATE"
        );
        assert!(key.exists(), "source must be kept");
    }

    #[test]
    fn missing_source_is_skipped() {
        let install = tempfile::tempdir().unwrap();
        let res = Credential::new(PathBuf::from("/nonexistent/key"), install.path().join("auth"));
        assert!(matches!(
            res.apply().unwrap(),
            ResourceChange::Skipped { .. }
        ));
        assert!(!install.path().join("auth").exists());
    }

    #[test]
    fn copy_failure_is_typed() {
        let home = tempfile::tempdir().unwrap();
        let key = home.path().join("id_rsa");
        std::fs::write(&key, "PRIVATE").unwrap();
        let blocker = home.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let res = Credential::new(key, blocker.join("auth"));
        let err = res.apply().unwrap_err();
        let typed = err.downcast_ref::<InstallError>().unwrap();
        assert!(typed.is_recoverable());
    }
}
