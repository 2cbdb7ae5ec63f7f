// Shared helpers for integration tests.
//
// Provides a temporary home directory plus the repository's bundled data
// directory so each integration test can run a real install without touching
// the invoking user's files.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use benchtool_installer::commands::install::InstallPlan;
use benchtool_installer::logging::Logger;

/// The data bundle shipped with the repository.
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// An isolated install target backed by a [`tempfile::TempDir`].
///
/// `HOME` resolves to `<tmp>/home`, so the bundled `install.ini` installs
/// into `<tmp>/home/benchtool`.
pub struct InstallFixture {
    /// Temporary directory holding the fake home and any extra files.
    pub root: tempfile::TempDir,
}

impl InstallFixture {
    /// Create a fixture with an empty home directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home");
        Self { root }
    }

    /// The fake home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Where the bundled configuration installs to.
    pub fn install_dir(&self) -> PathBuf {
        self.home().join("benchtool")
    }

    /// Build root of the bundled configuration.
    pub fn build_dir(&self) -> PathBuf {
        self.install_dir().join("build")
    }

    /// Results root of the bundled configuration.
    pub fn bench_dir(&self) -> PathBuf {
        self.install_dir().join("results")
    }

    /// The fake shell startup file.
    pub fn bashrc(&self) -> PathBuf {
        self.home().join(".bashrc")
    }

    /// Write `content` to `<tmp>/<name>` and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    /// Environment lookup exposing only `HOME`.
    pub fn env(&self) -> impl Fn(&str) -> Option<String> + use<> {
        let home = self.home().display().to_string();
        move |name| (name == "HOME").then(|| home.clone())
    }

    /// An install plan using `config` (or the bundled default).
    pub fn plan(&self, config: Option<PathBuf>) -> InstallPlan {
        InstallPlan {
            config,
            data_dir: bundled_data_dir(),
            shell_rc: self.bashrc(),
            dry_run: false,
        }
    }
}

/// A fresh logger for one command run.
pub fn logger() -> Arc<Logger> {
    Arc::new(Logger::new("integration-test"))
}
