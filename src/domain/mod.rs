//! Domain types for DemoKit
//!
//! This module contains the core types shared by the menu, the runner and
//! the worker:
//! - Scenario: the unit-of-work contract
//! - Selection: resolved menu input
//! - MenuAction: custom keyed menu entries
//! - RunOutcome: how one run ended

pub mod action;
pub mod outcome;
pub mod selection;
pub mod unit;

pub use action::MenuAction;
pub use outcome::{RunOutcome, UnitFailure};
pub use selection::Selection;
pub use unit::{Scenario, UnitError, UnitResult, cancellable_sleep, ensure_not_cancelled};
