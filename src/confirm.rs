//! Cancellable confirmation window before destructive actions.
//!
//! A [`ConfirmationWindow`] warns, waits a fixed delay, then lets the action
//! proceed.  Pressing Ctrl-C during the wait cancels the action instead of
//! killing the process half-way through a deletion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use crate::error::InstallError;
use crate::logging::Log;

/// Delay before a full uninstall.
pub const UNINSTALL_DELAY: Duration = Duration::from_secs(5);
/// Delay before deleting temp files or removing an application.
pub const CLEANUP_DELAY: Duration = Duration::from_secs(10);

/// Interval at which the cancel flag is polled.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A cheaply-clonable flag raised when the user asks to cancel.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancelSignal {
    /// Create a new signal in the "not cancelled" state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cancellation request.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`Self::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Process-wide signal raised by Ctrl-C.
///
/// The handler is installed on first use.  If it cannot be installed the
/// default behaviour (terminate) still lets the user abort the wait.
fn interrupt_signal(log: &dyn Log) -> &'static CancelSignal {
    static SIGNAL: OnceLock<CancelSignal> = OnceLock::new();
    SIGNAL.get_or_init(|| {
        let signal = CancelSignal::new();
        let handler_signal = signal.clone();
        if let Err(e) = ctrlc::set_handler(move || handler_signal.cancel()) {
            log.debug(&format!("cannot install Ctrl-C handler: {e}"));
        }
        signal
    })
}

/// The "warn, wait, then proceed" step in front of a destructive action.
#[derive(Debug, Clone)]
pub struct ConfirmationWindow {
    /// Short description of the action, e.g. `"uninstall"`.
    pub action: String,
    /// How long to wait before proceeding.
    pub delay: Duration,
    /// Proceed immediately (`--yes`).
    pub assume_yes: bool,
}

impl ConfirmationWindow {
    /// Create a window for `action` with the given default delay.
    ///
    /// `delay_override` (from `--delay`) replaces the default when set.
    #[must_use]
    pub fn new(
        action: &str,
        default: Duration,
        delay_override: Option<u64>,
        assume_yes: bool,
    ) -> Self {
        Self {
            action: action.to_string(),
            delay: delay_override.map_or(default, Duration::from_secs),
            assume_yes,
        }
    }

    /// Wait for the window to elapse, cancelling on Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Cancelled`] if the user pressed Ctrl-C.
    pub fn confirm(&self, log: &dyn Log) -> Result<(), InstallError> {
        if self.assume_yes {
            log.debug(&format!("{}: confirmation skipped", self.action));
            return Ok(());
        }
        self.wait(log, interrupt_signal(log))
    }

    /// Wait for the window to elapse, watching `signal`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Cancelled`] if `signal` is raised before the
    /// delay elapses.
    pub fn wait(&self, log: &dyn Log, signal: &CancelSignal) -> Result<(), InstallError> {
        if self.assume_yes {
            return Ok(());
        }
        log.warn(&format!(
            "{} will start in {} seconds, press Ctrl-C to cancel",
            self.action,
            self.delay.as_secs()
        ));
        let deadline = Instant::now() + self.delay;
        loop {
            if signal.is_cancelled() {
                return Err(InstallError::Cancelled(self.action.clone()));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}
