//! Shell startup file integration.
use anyhow::{Context as _, Result};
use std::io::Write as _;
use std::path::PathBuf;

use super::{Applicable, ResourceChange};

/// Substring whose presence means the profile is already integrated.
pub const PROFILE_MARKER: &str = "benchtool";

/// A shell startup file that loads the benchtool module.
#[derive(Debug, Clone)]
pub struct ShellProfile {
    /// Startup file to append to (e.g. `~/.bashrc`).
    pub rc_file: PathBuf,
    /// Directory appended to `MODULEPATH`.
    pub modulefiles_dir: PathBuf,
}

impl ShellProfile {
    /// Create a new shell profile resource.
    #[must_use]
    pub const fn new(rc_file: PathBuf, modulefiles_dir: PathBuf) -> Self {
        Self {
            rc_file,
            modulefiles_dir,
        }
    }

    /// The lines appended to the startup file.
    #[must_use]
    pub fn block(&self) -> String {
        format!(
            "# BENCHTOOL\nexport MODULEPATH=$MODULEPATH:{}\nml benchtool\n",
            self.modulefiles_dir.display()
        )
    }

    /// Current contents of the startup file; a missing file reads as empty.
    fn read(&self) -> Result<String> {
        match std::fs::read_to_string(&self.rc_file) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.rc_file.display())),
        }
    }

    /// Whether the startup file already mentions benchtool.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn is_integrated(&self) -> Result<bool> {
        Ok(self.read()?.contains(PROFILE_MARKER))
    }
}

impl Applicable for ShellProfile {
    fn description(&self) -> String {
        self.rc_file.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let content = self.read()?;
        if content.contains(PROFILE_MARKER) {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        let mut text = String::new();
        if !content.is_empty() && !content.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.block());

        super::fs::ensure_parent_dir(&self.rc_file)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.rc_file)
            .with_context(|| format!("opening {}", self.rc_file.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("appending to {}", self.rc_file.display()))?;
        Ok(ResourceChange::Applied)
    }
}
