//! Generic resource processing shared by all tasks.
use anyhow::Result;

use super::Context;
use crate::resources::{Applicable, ResourceChange};

/// Outcome of a task that ran to completion.
///
/// # Examples
///
/// ```
/// use benchtool_installer::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("no credential configured".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task had nothing to do.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for tasks that process several resources.
///
/// # Examples
///
/// ```
/// use benchtool_installer::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 7, already_ok: 0, skipped: 1 };
/// assert_eq!(stats.summary(false), "7 changed, 0 already ok, 1 skipped");
/// assert_eq!(stats.summary(true), "7 would change, 0 already ok, 1 skipped");
/// ```
#[derive(Debug, Default)]
pub struct TaskStats {
    /// Number of items changed or applied.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items skipped.
    pub skipped: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 1 already ok").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and return the appropriate `TaskResult`.
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
    }
}

/// How a batch of resources is processed.
#[derive(Debug)]
pub struct ProcessOpts<'a> {
    /// Verb for log messages (e.g. "deploy", "remove").
    pub verb: &'a str,
    /// Propagate errors (bail). If `false`, recoverable errors are warned
    /// about and counted as skipped.
    pub bail_on_error: bool,
}

impl<'a> ProcessOpts<'a> {
    /// Apply every resource, bailing on the first error.
    #[must_use]
    pub const fn apply_all(verb: &'a str) -> Self {
        Self {
            verb,
            bail_on_error: true,
        }
    }

    /// Warn on recoverable errors instead of bailing.
    #[must_use]
    pub const fn no_bail(mut self) -> Self {
        self.bail_on_error = false;
        self
    }
}

/// Apply each resource in order.
///
/// # Errors
///
/// Returns the first error raised by a resource when `opts.bail_on_error` is
/// set, or when the error is not recoverable.
pub fn process_resources<R: Applicable>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    opts: &ProcessOpts,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        stats += process_single(ctx, &resource, opts, R::apply)?;
    }
    Ok(stats.finish(ctx))
}

/// Remove each resource in order.
///
/// # Errors
///
/// See [`process_resources`].
pub fn process_resources_remove<R: Applicable>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    opts: &ProcessOpts,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        stats += process_single(ctx, &resource, opts, R::remove)?;
    }
    Ok(stats.finish(ctx))
}

fn process_single<R: Applicable>(
    ctx: &Context,
    resource: &R,
    opts: &ProcessOpts,
    action: fn(&R) -> Result<ResourceChange>,
) -> Result<TaskStats> {
    let desc = resource.description();
    let mut stats = TaskStats::new();

    if ctx.dry_run {
        ctx.log.dry_run(&format!("would {}: {desc}", opts.verb));
        stats.changed += 1;
        return Ok(stats);
    }

    match action(resource) {
        Ok(ResourceChange::Applied) => {
            ctx.log.debug(&format!("{}: {desc}", opts.verb));
            stats.changed += 1;
        }
        Ok(ResourceChange::AlreadyCorrect) => {
            ctx.log.debug(&format!("ok: {desc}"));
            stats.already_ok += 1;
        }
        Ok(ResourceChange::Skipped { reason }) => {
            ctx.log.warn(&format!("skipping {desc}: {reason}"));
            stats.skipped += 1;
        }
        Err(e) if !opts.bail_on_error && is_recoverable(&e) => {
            ctx.log.warn(&format!("{e:#}"));
            stats.skipped += 1;
        }
        Err(e) => return Err(e),
    }
    Ok(stats)
}

fn is_recoverable(err: &anyhow::Error) -> bool {
    err.downcast_ref::<crate::error::InstallError>()
        .is_some_and(crate::error::InstallError::is_recoverable)
}
