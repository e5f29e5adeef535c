//! Worker runner - the single-shot run scope manager.

use std::sync::Arc;

use log::{error, info};
use tokio_util::sync::CancellationToken;

use super::args::ArgsOptions;
use super::executor::ModeExecutor;
use super::output::OutputHelper;
use crate::config::WorkerOptions;
use crate::coordination::{CancelCoordinator, CancelPolicy, ScopeSlot};
use crate::domain::UnitError;
use crate::error::{DemoKitError, Result};
use crate::runner::RunScope;

/// Runs one worker mode inside one run scope for the whole worker lifetime.
pub struct WorkerRunner {
    options: WorkerOptions,
    args: ArgsOptions,
    output: OutputHelper,
    executor: Arc<dyn ModeExecutor>,
    slot: ScopeSlot,
    handle_interrupt: bool,
}

impl WorkerRunner {
    pub fn new(options: WorkerOptions, args: ArgsOptions, output: OutputHelper, executor: Arc<dyn ModeExecutor>) -> Self {
        Self {
            options,
            args,
            output,
            executor,
            slot: ScopeSlot::new(),
            handle_interrupt: true,
        }
    }

    /// Share the interrupt slot with a host, or observe it from tests.
    pub fn with_slot(mut self, slot: ScopeSlot) -> Self {
        self.slot = slot;
        self
    }

    /// Skip installing the Ctrl+C listener.
    pub fn without_interrupt_handler(mut self) -> Self {
        self.handle_interrupt = false;
        self
    }

    pub fn slot(&self) -> &ScopeSlot {
        &self.slot
    }

    /// Run with a fresh outer token.
    pub async fn run(&self) -> Result<i32> {
        self.run_with(&CancellationToken::new()).await
    }

    /// Run under `outer`. Cancellation yields exit code 0; any other failure
    /// of the mode is returned as `ModeFailed`.
    pub async fn run_with(&self, outer: &CancellationToken) -> Result<i32> {
        self.print_startup();

        // The scope exists for the listener's whole lifetime, so every
        // interrupt reaches the worker.
        let scope = RunScope::enter(outer, &self.slot);
        let policy = CancelPolicy {
            handle_interrupt: self.handle_interrupt,
            exit_on_idle: false,
        };
        let registration = CancelCoordinator::new(policy, self.slot.clone()).register();

        let result = self.executor.execute(scope.token()).await;
        drop(registration);
        drop(scope);

        match result {
            Ok(code) => {
                info!("Worker finished with exit code {}", code);
                Ok(code)
            }
            Err(UnitError::Cancelled) => {
                self.output.blank_line();
                self.output.write_line("Worker cancelled.");
                info!("Worker cancelled");
                Ok(0)
            }
            Err(UnitError::Failed(report)) => {
                error!("Worker mode {} failed: {:#}", self.args.mode, report);
                Err(DemoKitError::ModeFailed(report))
            }
        }
    }

    fn print_startup(&self) {
        self.output.write_line(&self.options.worker_name);
        self.output.write_line("Console demo worker started");
        self.output.write_line(&format!("Mode: {}", self.args.mode));
        self.output.write_line(&format!("PID: {}", std::process::id()));
        self.output.blank_line();
    }
}
