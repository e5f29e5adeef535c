//! Run outcome types.
//!
//! This module defines how a single scenario run ended, as seen by the
//! run scope manager.

use std::any::Any;

/// Category and message of an unexpected scenario failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// Coarse kind of failure ("error" or "panic")
    pub category: String,
    /// Human readable detail
    pub message: String,
}

impl UnitFailure {
    pub fn error(report: &eyre::Report) -> Self {
        Self {
            category: "error".to_string(),
            message: format!("{report:#}"),
        }
    }

    /// Build a failure from a caught panic payload.
    pub fn panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self {
            category: "panic".to_string(),
            message,
        }
    }
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Scenario returned normally
    Completed,
    /// Scenario observed its cancellation token
    Cancelled,
    /// Scenario failed or panicked
    Failed(UnitFailure),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed(_))
    }
}
