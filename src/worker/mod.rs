//! Console worker
//!
//! A process-like unit with one mode chosen up front:
//! - args: `--mode`, `--interval`, `--exit-after`, `--color`
//! - executor: the mode behaviors
//! - runner: run scope, interrupt listener, cancellation-as-success
//! - ConsoleDemoWorker: single-use entry point

pub mod args;
pub mod art;
pub mod executor;
pub mod output;
pub mod runner;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;

pub use args::{ArgsOptions, ParsedArgs, WorkerMode, parse_args};
pub use executor::{ModeExecutor, WorkerModeExecutor};
pub use output::{CapturedOutput, OutputHelper};
pub use runner::WorkerRunner;

use crate::config::WorkerOptions;
use crate::error::{DemoKitError, Result};

/// Exit code for argument and validation failures.
pub const EXIT_INVALID_ARGS: i32 = 1;

type ExecutorFactory = Box<dyn Fn(ArgsOptions, OutputHelper) -> Arc<dyn ModeExecutor> + Send + Sync>;
type OutputFactory = Box<dyn Fn(colored::Color) -> OutputHelper + Send + Sync>;

/// Demo worker that may be run exactly once.
pub struct ConsoleDemoWorker {
    options: WorkerOptions,
    args: Vec<String>,
    has_run: AtomicBool,
    output_factory: OutputFactory,
    executor_factory: Option<ExecutorFactory>,
    handle_interrupt: bool,
}

impl ConsoleDemoWorker {
    pub fn new<I, S>(options: WorkerOptions, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options,
            args: args.into_iter().map(Into::into).collect(),
            has_run: AtomicBool::new(false),
            output_factory: Box::new(OutputHelper::stdout),
            executor_factory: None,
            handle_interrupt: true,
        }
    }

    /// Build output from the parsed color instead of writing to stdout.
    pub fn with_output(mut self, factory: impl Fn(colored::Color) -> OutputHelper + Send + Sync + 'static) -> Self {
        self.output_factory = Box::new(factory);
        self
    }

    /// Replace the built-in mode executor.
    pub fn with_executor(
        mut self,
        factory: impl Fn(ArgsOptions, OutputHelper) -> Arc<dyn ModeExecutor> + Send + Sync + 'static,
    ) -> Self {
        self.executor_factory = Some(Box::new(factory));
        self
    }

    pub fn without_interrupt_handler(mut self) -> Self {
        self.handle_interrupt = false;
        self
    }

    /// Parse arguments and run the selected mode.
    ///
    /// Returns the exit code: 1 for bad arguments, 0 for normal completion or
    /// cancellation. A failing mode is returned as an error. A second call on
    /// the same instance is a `Usage` error.
    pub async fn run(&self) -> Result<i32> {
        if self.has_run.swap(true, Ordering::SeqCst) {
            return Err(DemoKitError::Usage(
                "ConsoleDemoWorker can only be run once per instance".to_string(),
            ));
        }

        let parsed = match parse_args(self.args.iter().cloned()) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Rejected worker arguments {:?}: {}", self.args, e);
                let fallback = (self.output_factory)(ArgsOptions::default().color);
                fallback.write_line(&e.to_string());
                return Ok(EXIT_INVALID_ARGS);
            }
        };

        let args = parsed.options;
        let output = (self.output_factory)(args.color);
        for warning in &parsed.warnings {
            warn!("{}", warning);
            output.write_line(warning);
        }

        let executor = match &self.executor_factory {
            Some(factory) => factory(args, output.clone()),
            None => Arc::new(WorkerModeExecutor::new(args, self.options.clone(), output.clone())),
        };

        let mut runner = WorkerRunner::new(self.options.clone(), args, output, executor);
        if !self.handle_interrupt {
            runner = runner.without_interrupt_handler();
        }
        runner.run().await
    }
}
