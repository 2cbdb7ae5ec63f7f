//! Command: install benchtool from the data bundle.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::config::{DEFAULT_CONFIG, InstallConfig};
use crate::error::InstallError;
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context};

/// Environment variable overriding the data bundle location.
pub const DATA_DIR_ENV: &str = "BENCHTOOL_DATA_DIR";

/// Everything an install run needs once the CLI has been interpreted.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// User-supplied configuration file, if any.
    pub config: Option<PathBuf>,
    /// Data bundle the manifest items are copied from.
    pub data_dir: PathBuf,
    /// Shell startup file receiving the activation block.
    pub shell_rc: PathBuf,
    /// Preview only.
    pub dry_run: bool,
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the data bundle cannot be found, the configuration
/// cannot be resolved, or any install task fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    let env = |name: &str| std::env::var(name).ok();
    let data_dir = resolve_data_dir(global.data_dir.as_deref(), env)?;
    let shell_rc = match &opts.shell_rc {
        Some(path) => path.clone(),
        None => default_shell_rc(env)?,
    };
    let plan = InstallPlan {
        config: opts.config.clone(),
        data_dir,
        shell_rc,
        dry_run: global.dry_run,
    };
    execute(&plan, log, env)
}

/// Resolve the configuration and run every install task.
///
/// `env` answers variable references in the configuration file.
///
/// # Errors
///
/// Returns the first configuration or task error.
pub fn execute<F>(plan: &InstallPlan, log: &Arc<Logger>, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    log.info(&format!("benchtool-installer {}", super::version()));

    log.stage("Resolving configuration");
    let config = InstallConfig::load_with(plan.config.as_deref(), &plan.data_dir, env)?;
    log.info(&format!("config: {}", config.source.display()));
    for entry in &config.paths {
        log.debug(&format!("{} = {}", entry.name, entry.path.display()));
    }

    let ctx = Context::new(
        &config,
        plan.data_dir.clone(),
        plan.shell_rc.clone(),
        Arc::clone(log) as Arc<dyn Log>,
        plan.dry_run,
    );
    let all_tasks = tasks::all_install_tasks();
    super::run_tasks_to_completion(all_tasks.iter().map(Box::as_ref), &ctx, log)?;

    if !plan.dry_run {
        log.info(&format!(
            "benchtool installed in {}",
            config.paths.install_dir().display()
        ));
    }
    Ok(())
}

/// Locate the data bundle.
///
/// Tries, in order: the explicit `--data-dir`, `$BENCHTOOL_DATA_DIR`,
/// `share/benchtool/data` or `data` next to the executable's parent, and
/// `./data`.  A candidate must contain `install.ini`.
///
/// # Errors
///
/// Returns [`InstallError::DataDirNotFound`] if no candidate qualifies.
pub fn resolve_data_dir<F>(explicit: Option<&Path>, env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();
    let candidates = data_dir_candidates(explicit, &env, exe_dir.as_deref(), cwd.as_deref());
    let found = candidates
        .into_iter()
        .find(|dir| dir.join(DEFAULT_CONFIG).is_file())
        .ok_or(InstallError::DataDirNotFound)?;
    dunce::canonicalize(&found).with_context(|| format!("resolving {}", found.display()))
}

/// Candidate data bundle locations, in priority order.
///
/// An explicit directory is the only candidate when given.
fn data_dir_candidates<F>(
    explicit: Option<&Path>,
    env: &F,
    exe_dir: Option<&Path>,
    cwd: Option<&Path>,
) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = explicit {
        return vec![dir.to_path_buf()];
    }
    let mut candidates = Vec::new();
    if let Some(dir) = env(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        candidates.push(PathBuf::from(dir));
    }
    if let Some(exe_dir) = exe_dir {
        candidates.push(exe_dir.join("../share/benchtool/data"));
        candidates.push(exe_dir.join("../data"));
        // target/<profile>/ during development
        candidates.push(exe_dir.join("../../data"));
    }
    if let Some(cwd) = cwd {
        candidates.push(cwd.join("data"));
    }
    candidates
}

/// `$HOME/.bashrc`.
///
/// # Errors
///
/// Returns an error if `HOME` is not set.
pub fn default_shell_rc<F>(env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    env("HOME")
        .filter(|h| !h.is_empty())
        .map(|home| PathBuf::from(home).join(".bashrc"))
        .context("HOME is not set; pass --shell-rc")
}
