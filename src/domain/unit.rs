//! The unit-of-work contract.
//!
//! A `Scenario` is anything the menu can list and run. It receives a
//! cancellation token scoped to its own run and is expected to observe it
//! during every wait or loop.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a unit of work stopped early.
#[derive(Debug, Error)]
pub enum UnitError {
    /// The unit observed its cancellation token and unwound
    #[error("operation was cancelled")]
    Cancelled,

    /// Any other abnormal termination
    #[error(transparent)]
    Failed(#[from] eyre::Report),
}

impl UnitError {
    /// Build a failure from a plain message.
    pub fn failed(message: impl Into<String>) -> Self {
        UnitError::Failed(eyre::eyre!(message.into()))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, UnitError::Cancelled)
    }
}

/// Result of a single unit invocation.
pub type UnitResult<T = ()> = std::result::Result<T, UnitError>;

/// A named, cancellable, independently runnable piece of behavior.
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Display name used in menus and run headers.
    fn name(&self) -> &str;

    /// Execute the scenario until it completes or observes `cancel`.
    async fn run(&self, cancel: CancellationToken) -> UnitResult;
}

/// Return `Err(UnitError::Cancelled)` if the token has fired.
pub fn ensure_not_cancelled(cancel: &CancellationToken) -> UnitResult {
    if cancel.is_cancelled() {
        return Err(UnitError::Cancelled);
    }
    Ok(())
}

/// Sleep for `duration`, waking early with `UnitError::Cancelled` if the token fires.
pub async fn cancellable_sleep(duration: Duration, cancel: &CancellationToken) -> UnitResult {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(UnitError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
