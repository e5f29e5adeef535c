//! Per-run cancellation scope.

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::coordination::ScopeSlot;

/// Cancellation boundary for exactly one unit's execution.
///
/// Entering derives a child of the outer token and publishes it as the active
/// scope; dropping clears the publication, on every exit path including
/// unwinding.
#[derive(Debug)]
pub struct RunScope {
    token: CancellationToken,
    slot: ScopeSlot,
}

impl RunScope {
    /// Derive a child of `outer` and make it the active scope.
    pub fn enter(outer: &CancellationToken, slot: &ScopeSlot) -> Self {
        let token = outer.child_token();
        slot.publish(token.clone());
        debug!("Run scope entered");
        Self {
            token,
            slot: slot.clone(),
        }
    }

    /// The scope's own token, handed to the unit.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancel this scope only; the outer token and siblings are untouched.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for RunScope {
    fn drop(&mut self) {
        self.slot.clear();
        debug!("Run scope exited");
    }
}
