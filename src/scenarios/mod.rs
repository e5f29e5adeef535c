//! Built-in demo scenarios
//!
//! Small units used by the `menu` command: one that finishes at once, one
//! that counts down, one that sleeps, one that only stops on Ctrl+C and one
//! that fails on purpose.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use colored::Color;
use tokio_util::sync::CancellationToken;

use crate::domain::{Scenario, UnitError, UnitResult, cancellable_sleep, ensure_not_cancelled};
use crate::worker::OutputHelper;

/// The default scenario list, in menu order.
pub fn builtin(output: OutputHelper) -> Vec<Arc<dyn Scenario>> {
    vec![
        Arc::new(Hello::new(output.clone())),
        Arc::new(Countdown::new(output.clone(), 5, Duration::from_secs(1))),
        Arc::new(Sleep::new(output.clone(), Duration::from_secs(5))),
        Arc::new(CtrlC::new(output.clone(), Duration::from_secs(1))),
        Arc::new(Failing::new(output, Duration::from_secs(2))),
    ]
}

/// Output used by the built-in scenarios when run from the binary.
pub fn console_output() -> OutputHelper {
    OutputHelper::stdout(Color::White)
}

pub struct Hello {
    output: OutputHelper,
}

impl Hello {
    pub fn new(output: OutputHelper) -> Self {
        Self { output }
    }
}

#[async_trait]
impl Scenario for Hello {
    fn name(&self) -> &str {
        "hello"
    }

    async fn run(&self, _cancel: CancellationToken) -> UnitResult {
        self.output.write_line("Hello from DemoKit!");
        self.output.write_line("This is the simplest possible demo scenario.");
        Ok(())
    }
}

/// Counts down from `from` to 1, one step per `step`.
pub struct Countdown {
    output: OutputHelper,
    from: u32,
    step: Duration,
}

impl Countdown {
    pub fn new(output: OutputHelper, from: u32, step: Duration) -> Self {
        Self { output, from, step }
    }
}

#[async_trait]
impl Scenario for Countdown {
    fn name(&self) -> &str {
        "countdown"
    }

    async fn run(&self, cancel: CancellationToken) -> UnitResult {
        self.output.write_line("Countdown started.");
        for remaining in (1..=self.from).rev() {
            ensure_not_cancelled(&cancel)?;
            self.output.write_line(&remaining.to_string());
            cancellable_sleep(self.step, &cancel).await?;
        }
        self.output.write_line("Liftoff!");
        Ok(())
    }
}

pub struct Sleep {
    output: OutputHelper,
    duration: Duration,
}

impl Sleep {
    pub fn new(output: OutputHelper, duration: Duration) -> Self {
        Self { output, duration }
    }
}

#[async_trait]
impl Scenario for Sleep {
    fn name(&self) -> &str {
        "sleep"
    }

    async fn run(&self, cancel: CancellationToken) -> UnitResult {
        self.output.write_line(&format!("Sleeping for {} seconds...", self.duration.as_secs()));
        self.output.print_exit_hint();
        cancellable_sleep(self.duration, &cancel).await?;
        self.output.blank_line();
        self.output.write_line("Sleep completed.");
        Ok(())
    }
}

/// Ticks until cancelled, then shuts down cleanly and reports success.
pub struct CtrlC {
    output: OutputHelper,
    tick: Duration,
}

impl CtrlC {
    pub fn new(output: OutputHelper, tick: Duration) -> Self {
        Self { output, tick }
    }
}

#[async_trait]
impl Scenario for CtrlC {
    fn name(&self) -> &str {
        "Ctrl+C"
    }

    async fn run(&self, cancel: CancellationToken) -> UnitResult {
        self.output.write_line("Ctrl+C scenario started.");
        self.output.print_exit_hint();

        let mut counter: u64 = 0;
        loop {
            counter += 1;
            self.output.write_line(&format!("Running... tick {}", counter));
            if let Err(UnitError::Cancelled) = cancellable_sleep(self.tick, &cancel).await {
                break;
            }
        }

        self.output.blank_line();
        self.output.write_line("Cancellation requested (Ctrl+C).");
        self.output.write_line("Shutting down scenario gracefully.");
        Ok(())
    }
}

/// Fails after a short delay.
pub struct Failing {
    output: OutputHelper,
    delay: Duration,
}

impl Failing {
    pub fn new(output: OutputHelper, delay: Duration) -> Self {
        Self { output, delay }
    }
}

#[async_trait]
impl Scenario for Failing {
    fn name(&self) -> &str {
        "error"
    }

    async fn run(&self, cancel: CancellationToken) -> UnitResult {
        self.output.write_line("Starting error scenario...");
        self.output.write_line("An error will be raised shortly.");
        self.output.blank_line();
        cancellable_sleep(self.delay, &cancel).await?;
        Err(UnitError::failed("This error is raised intentionally by the error scenario."))
    }
}
