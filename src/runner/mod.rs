//! Run scope manager.
//!
//! This module provides:
//! - RunScope: a child cancellation scope published while one unit runs
//! - ScenarioRunner: sequential execution with per-scenario failure containment

mod scenario_runner;
mod scope;

pub use scenario_runner::ScenarioRunner;
pub use scope::RunScope;
