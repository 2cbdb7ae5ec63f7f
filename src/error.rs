//! Domain-specific error types for the benchtool installer.
//!
//! Internal modules return [`InstallError`] while command handlers at the
//! CLI boundary convert it to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error taxonomy
//!
//! ```text
//! InstallError
//! ├── ConfigNotFound / ConfigIncomplete / UnresolvedVariable / InvalidConfig
//! │                                   : fatal, before any mutation
//! ├── AlreadyInstalled / DataDirNotFound / EnvironmentNotActive
//! │                                   : fatal, before any mutation
//! ├── InstallRootCreation / DeploymentFailed / ActivationScriptMissing
//! │                                   : fatal, mid-mutation (no rollback)
//! ├── CredentialCopyFailed / ModuleDirectoryMissing
//! │                                   : reported as warnings, never fatal
//! └── Cancelled                       : user aborted a confirmation window
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the install, uninstall, and cleanup workflows.
#[derive(Error, Debug)]
pub enum InstallError {
    /// A user-supplied configuration file does not exist.
    #[error("input file '{}' not found", .0.display())]
    ConfigNotFound(PathBuf),

    /// A required key is absent from the `[paths]` section.
    #[error("input file '{file}' missing required key '{key}' in [paths]")]
    ConfigIncomplete {
        /// File name of the configuration that was read.
        file: String,
        /// The missing key.
        key: String,
    },

    /// A path value still contains a `$` reference after expansion.
    #[error("unable to resolve variable in {key} = {value}")]
    UnresolvedVariable {
        /// Logical name of the path entry.
        key: String,
        /// The value after expansion.
        value: String,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig {
        /// Path of the offending file.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A managed directory already exists.
    #[error("existing installation files found in {}; please clean up before installing", .0.display())]
    AlreadyInstalled(PathBuf),

    /// The install root could not be created.
    #[error("failed to create install directory {}: {source}", .path.display())]
    InstallRootCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Neither a directory nor a file copy succeeded for a manifest item.
    #[error("failed to install {} to {}", .source_path.display(), .destination.display())]
    DeploymentFailed {
        /// Item inside the data bundle.
        source_path: PathBuf,
        /// Destination root it was being copied into.
        destination: PathBuf,
    },

    /// No activation script was found in the module directory.
    #[error("no activation script (*.lua) found in {}", .0.display())]
    ActivationScriptMissing(PathBuf),

    /// The benchtool module is not loaded in the current session.
    #[error("environment variable {0} is not set; ensure the benchtool module is loaded before uninstalling")]
    EnvironmentNotActive(String),

    /// The credential file could not be copied into the install tree.
    #[error("unable to copy credential {}: {reason}", .path.display())]
    CredentialCopyFailed {
        /// The configured credential path.
        path: PathBuf,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The module directory belonging to a removed application is missing.
    #[error("no module file located in {}, skipping", .0.display())]
    ModuleDirectoryMissing(PathBuf),

    /// The bundled data directory could not be located.
    #[error("cannot locate the benchtool data bundle; use --data-dir or set BENCHTOOL_DATA_DIR")]
    DataDirNotFound,

    /// The user cancelled a destructive action during the confirmation window.
    #[error("{0} cancelled by user")]
    Cancelled(String),
}

impl InstallError {
    /// Whether the error should be reported as a warning and the workflow
    /// allowed to continue.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CredentialCopyFailed { .. } | Self::ModuleDirectoryMissing(_)
        )
    }
}
