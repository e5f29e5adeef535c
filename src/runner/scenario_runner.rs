//! Scenario runner - the run scope manager for the menu.
//!
//! Each scenario gets its own `RunScope`. Cancellation, errors and panics
//! are contained here and rendered; none of them escape to the menu loop.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use super::scope::RunScope;
use crate::coordination::ScopeSlot;
use crate::domain::{RunOutcome, Scenario, UnitError, UnitFailure};
use crate::menu::Renderer;

/// Executes scenarios one at a time, each in its own cancellation scope.
pub struct ScenarioRunner {
    renderer: Arc<dyn Renderer>,
    slot: ScopeSlot,
}

impl ScenarioRunner {
    pub fn new(renderer: Arc<dyn Renderer>, slot: ScopeSlot) -> Self {
        Self { renderer, slot }
    }

    pub fn slot(&self) -> &ScopeSlot {
        &self.slot
    }

    /// Run every scenario in order. A failing or cancelled scenario does not
    /// stop the batch.
    pub async fn run_many(&self, scenarios: &[Arc<dyn Scenario>], outer: &CancellationToken) -> Vec<RunOutcome> {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(self.run_one(scenario.as_ref(), outer).await);
        }
        outcomes
    }

    /// Run one scenario.
    ///
    /// The scenario is started even if `outer` is already cancelled so it can
    /// observe cancellation itself.
    pub async fn run_one(&self, scenario: &dyn Scenario, outer: &CancellationToken) -> RunOutcome {
        let name = scenario.name().to_string();
        let scope = RunScope::enter(outer, &self.slot);

        self.renderer.print_scenario_header(&name);
        info!("Running scenario '{}'", name);

        let token = scope.token();
        let result = match std::panic::catch_unwind(AssertUnwindSafe(|| scenario.run(token))) {
            Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
            Err(payload) => Err(payload),
        };
        drop(scope);

        let outcome = match result {
            Ok(Ok(())) => RunOutcome::Completed,
            Ok(Err(UnitError::Cancelled)) => {
                self.renderer.print_cancelled();
                RunOutcome::Cancelled
            }
            Ok(Err(UnitError::Failed(report))) => {
                let failure = UnitFailure::error(&report);
                self.renderer.print_unexpected_error(&failure);
                RunOutcome::Failed(failure)
            }
            Err(payload) => {
                let failure = UnitFailure::panic(payload);
                self.renderer.print_unexpected_error(&failure);
                RunOutcome::Failed(failure)
            }
        };

        match &outcome {
            RunOutcome::Failed(failure) => {
                warn!("Scenario '{}' failed ({}): {}", name, failure.category, failure.message)
            }
            other => info!("Scenario '{}' finished: {:?}", name, other),
        }

        self.renderer.print_scenario_footer();
        outcome
    }
}
