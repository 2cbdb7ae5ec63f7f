//! Shared state handed to every task.
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::InstallConfig;
use crate::config::paths::PathTable;
use crate::logging::Log;

/// Shared context for task execution.
pub struct Context {
    /// Resolved managed paths; read-only for every task.
    pub paths: Arc<PathTable>,
    /// Optional private key to provision.
    pub credential: Option<PathBuf>,
    /// Directory the bundle items and configuration were read from.
    pub data_dir: PathBuf,
    /// Shell startup file receiving the activation block.
    pub shell_rc: PathBuf,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("paths", &self.paths)
            .field("credential", &self.credential)
            .field("data_dir", &self.data_dir)
            .field("shell_rc", &self.shell_rc)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context from a resolved configuration.
    #[must_use]
    pub fn new(
        config: &InstallConfig,
        data_dir: PathBuf,
        shell_rc: PathBuf,
        log: Arc<dyn Log>,
        dry_run: bool,
    ) -> Self {
        Self {
            paths: Arc::new(config.paths.clone()),
            credential: config.credential.clone(),
            data_dir,
            shell_rc,
            log,
            dry_run,
        }
    }
}
