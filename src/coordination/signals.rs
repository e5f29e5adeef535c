//! Interrupt routing for the menu and the worker
//!
//! `ScopeSlot` holds the cancellation token of whatever is currently running.
//! `CancelCoordinator` listens for Ctrl+C and routes each interrupt either to
//! that token or, when nothing is running, to process termination.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::MenuOptions;

/// Called with the exit code when an idle interrupt terminates the process.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Process-wide reference to the active run scope.
///
/// Publishing, clearing and the interrupt's read-and-cancel all take the same
/// lock, so an interrupt can never cancel a scope that was already cleared or
/// miss one that was just published.
#[derive(Clone, Default)]
pub struct ScopeSlot {
    current: Arc<Mutex<Option<CancellationToken>>>,
    listeners: Arc<AtomicUsize>,
}

impl ScopeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `token` the active scope.
    pub fn publish(&self, token: CancellationToken) {
        let mut current = self.lock();
        if current.is_some() {
            warn!("Publishing a run scope while another is still active");
        }
        *current = Some(token);
    }

    /// Remove the active scope. Returns whether one was present.
    pub fn clear(&self) -> bool {
        self.lock().take().is_some()
    }

    /// Check whether a scope is currently published
    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    /// Cancel the active scope, if any. Returns whether one was cancelled.
    pub fn cancel_active(&self) -> bool {
        match self.lock().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Number of installed interrupt listeners routing to this slot.
    pub fn listener_count(&self) -> usize {
        self.listeners.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        // A panic while holding this lock cannot leave the Option half-written.
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for ScopeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeSlot")
            .field("active", &self.is_active())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// How interrupts are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelPolicy {
    /// Install the Ctrl+C listener at all
    pub handle_interrupt: bool,
    /// Terminate the process when an interrupt arrives with no active scope
    pub exit_on_idle: bool,
}

impl Default for CancelPolicy {
    fn default() -> Self {
        Self {
            handle_interrupt: true,
            exit_on_idle: true,
        }
    }
}

impl From<&MenuOptions> for CancelPolicy {
    fn from(options: &MenuOptions) -> Self {
        Self {
            handle_interrupt: options.handle_cancel_key_press,
            exit_on_idle: options.exit_on_cancel_when_idle,
        }
    }
}

/// What an interrupt was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptRoute {
    /// The active scope was cancelled
    CancelledScope,
    /// No scope was active and the exit hook ran
    ExitedProcess,
    /// No scope was active and idle exit is disabled
    Ignored,
}

/// Routes Ctrl+C to the active run scope or to process exit.
#[derive(Clone)]
pub struct CancelCoordinator {
    policy: CancelPolicy,
    slot: ScopeSlot,
    exit_hook: ExitHook,
}

impl CancelCoordinator {
    /// Create a coordinator that exits the process on idle interrupts.
    pub fn new(policy: CancelPolicy, slot: ScopeSlot) -> Self {
        Self {
            policy,
            slot,
            exit_hook: Arc::new(|code| std::process::exit(code)),
        }
    }

    /// Replace what happens on an idle interrupt.
    pub fn with_exit_hook(mut self, hook: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.exit_hook = Arc::new(hook);
        self
    }

    pub fn policy(&self) -> CancelPolicy {
        self.policy
    }

    pub fn slot(&self) -> &ScopeSlot {
        &self.slot
    }

    /// Install the Ctrl+C listener.
    ///
    /// Returns `None` when interrupt handling is disabled. Must be called from
    /// within a tokio runtime.
    ///
    /// Dropping the returned registration stops routing, but tokio's
    /// process-wide SIGINT handler stays installed: for the rest of the
    /// process Ctrl+C no longer terminates by default, and an embedding host
    /// that relies on that must install its own handling.
    pub fn register(&self) -> Option<CancelRegistration> {
        if !self.policy.handle_interrupt {
            debug!("Interrupt handling disabled; listener not installed");
            return None;
        }

        let coordinator = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        coordinator.handle_interrupt();
                    }
                    Err(e) => {
                        warn!("Failed to listen for Ctrl+C: {}", e);
                        break;
                    }
                }
            }
        });

        self.slot.listeners.fetch_add(1, Ordering::SeqCst);
        info!("Interrupt listener installed");
        Some(CancelRegistration {
            handle,
            slot: self.slot.clone(),
        })
    }

    /// Route one interrupt. Synchronous and non-blocking apart from the slot lock.
    pub fn handle_interrupt(&self) -> InterruptRoute {
        let current = self.slot.lock();
        match current.as_ref() {
            Some(token) => {
                token.cancel();
                info!("Interrupt cancelled the active run scope");
                InterruptRoute::CancelledScope
            }
            None if self.policy.exit_on_idle => {
                info!("Interrupt while idle; exiting");
                (self.exit_hook)(0);
                InterruptRoute::ExitedProcess
            }
            None => {
                debug!("Interrupt while idle ignored");
                InterruptRoute::Ignored
            }
        }
    }
}

impl fmt::Debug for CancelCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelCoordinator")
            .field("policy", &self.policy)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Handle for an installed interrupt listener. Dropping it removes the listener.
#[derive(Debug)]
pub struct CancelRegistration {
    handle: JoinHandle<()>,
    slot: ScopeSlot,
}

impl CancelRegistration {
    /// Remove the listener.
    pub fn unregister(self) {
        drop(self);
    }
}

impl Drop for CancelRegistration {
    fn drop(&mut self) {
        self.handle.abort();
        self.slot.listeners.fetch_sub(1, Ordering::SeqCst);
        debug!("Interrupt listener removed");
    }
}
