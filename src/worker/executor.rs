//! Worker mode executor
//!
//! Translates the selected `WorkerMode` into behavior. The executor neither
//! parses arguments nor handles interrupts; it only observes the token it is
//! given.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::args::{ArgsOptions, WorkerMode};
use super::art;
use super::output::OutputHelper;
use crate::config::WorkerOptions;
use crate::domain::{UnitError, UnitResult, cancellable_sleep, ensure_not_cancelled};
use crate::input::{LineReader, StdinReader};

/// Runs one worker mode to completion. Returns the process exit code.
#[async_trait]
pub trait ModeExecutor: Send + Sync {
    async fn execute(&self, cancel: CancellationToken) -> UnitResult<i32>;
}

type SharedReader = Arc<Mutex<Box<dyn LineReader>>>;

/// Default executor for the built-in modes.
pub struct WorkerModeExecutor {
    args: ArgsOptions,
    options: WorkerOptions,
    output: OutputHelper,
    input: SharedReader,
}

impl WorkerModeExecutor {
    pub fn new(args: ArgsOptions, options: WorkerOptions, output: OutputHelper) -> Self {
        Self::with_input(args, options, output, StdinReader::stdin())
    }

    /// Use `input` instead of stdin for echo mode.
    pub fn with_input(args: ArgsOptions, options: WorkerOptions, output: OutputHelper, input: impl LineReader + 'static) -> Self {
        Self {
            args,
            options,
            output,
            input: Arc::new(Mutex::new(Box::new(input))),
        }
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.args.interval_ms)
    }

    async fn run_heartbeat(&self, cancel: &CancellationToken) -> UnitResult<i32> {
        self.output.print_exit_hint();
        let mut tick: u64 = 0;
        loop {
            ensure_not_cancelled(cancel)?;
            tick += 1;
            self.output.write_line(&fill(&self.options.run_message_template, tick));
            cancellable_sleep(self.interval(), cancel).await?;
        }
    }

    async fn exit_after_delay(&self, cancel: &CancellationToken) -> UnitResult<i32> {
        self.output.write_line(&format!("Worker will exit in {} seconds.", self.args.exit_after_secs));
        cancellable_sleep(Duration::from_secs(self.args.exit_after_secs), cancel).await?;
        self.output.write_line("Exiting normally.");
        Ok(0)
    }

    fn crash(&self) -> UnitResult<i32> {
        self.output.write_line("Crashing now...");
        Err(UnitError::failed("Intentional crash requested by --mode crash."))
    }

    async fn spam(&self, cancel: &CancellationToken) -> UnitResult<i32> {
        self.output.print_exit_hint();
        let mut index: u64 = 0;
        loop {
            ensure_not_cancelled(cancel)?;
            index += 1;
            self.output.write_line(&fill(&self.options.spam_message_template, index));
            cancellable_sleep(self.interval(), cancel).await?;
        }
    }

    async fn echo(&self, cancel: &CancellationToken) -> UnitResult<i32> {
        self.output.write_line("Echo mode: type a line and press Enter (Ctrl+C to stop).");
        let mut input = self.input.lock().await;
        loop {
            ensure_not_cancelled(cancel)?;
            let line = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(UnitError::Cancelled),
                line = input.read_line() => line,
            };
            match line {
                Ok(Some(line)) => self.output.write_line(&line),
                Ok(None) => {
                    debug!("Echo input ended; waiting for cancellation");
                    cancel.cancelled().await;
                    return Err(UnitError::Cancelled);
                }
                Err(e) => return Err(UnitError::Failed(eyre::eyre!("Failed to read input: {}", e))),
            }
        }
    }

    async fn art(&self, cancel: &CancellationToken) -> UnitResult<i32> {
        self.output.print_exit_hint();
        art::draw(&self.output, cancel).await?;
        Ok(0)
    }
}

#[async_trait]
impl ModeExecutor for WorkerModeExecutor {
    async fn execute(&self, cancel: CancellationToken) -> UnitResult<i32> {
        info!("Executing worker mode {}", self.args.mode);
        match self.args.mode {
            WorkerMode::Run => self.run_heartbeat(&cancel).await,
            WorkerMode::Exit => self.exit_after_delay(&cancel).await,
            WorkerMode::Crash => self.crash(),
            WorkerMode::Spam => self.spam(&cancel).await,
            WorkerMode::Echo => self.echo(&cancel).await,
            WorkerMode::Art => self.art(&cancel).await,
        }
    }
}

fn fill(template: &str, index: u64) -> String {
    template.replace("{0}", &index.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use crate::worker::output::CapturedOutput;
    use colored::Color;

    fn executor(mode: WorkerMode, input: ScriptedInput) -> (WorkerModeExecutor, CapturedOutput) {
        let captured = CapturedOutput::new();
        let output = OutputHelper::with_writer(Color::White, captured.clone());
        let args = ArgsOptions {
            mode,
            interval_ms: 10,
            exit_after_secs: 1,
            color: Color::White,
        };
        (WorkerModeExecutor::with_input(args, WorkerOptions::default(), output, input), captured)
    }

    fn cancel_after(token: &CancellationToken, millis: u64) {
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            canceller.cancel();
        });
    }

    #[test]
    fn test_fill_template() {
        assert_eq!(fill("Heartbeat {0}", 3), "Heartbeat 3");
        assert_eq!(fill("no index", 3), "no index");
    }

    #[tokio::test]
    async fn test_run_mode_heartbeats_until_cancelled() {
        let (executor, captured) = executor(WorkerMode::Run, ScriptedInput::default());
        let token = CancellationToken::new();
        cancel_after(&token, 55);

        let result = executor.execute(token).await;

        assert!(result.unwrap_err().is_cancelled());
        let lines = captured.lines();
        assert_eq!(lines[0], "Press Ctrl+C to exit.");
        assert_eq!(lines[2], "Heartbeat 1");
        assert!(lines.contains(&"Heartbeat 2".to_string()));
    }

    #[tokio::test]
    async fn test_exit_mode_returns_zero() {
        let (executor, captured) = executor(WorkerMode::Exit, ScriptedInput::default());

        let code = executor.execute(CancellationToken::new()).await.unwrap();

        assert_eq!(code, 0);
        assert_eq!(captured.lines(), vec!["Worker will exit in 1 seconds.", "Exiting normally."]);
    }

    #[tokio::test]
    async fn test_exit_mode_cancelled_early() {
        let (executor, captured) = executor(WorkerMode::Exit, ScriptedInput::default());
        let token = CancellationToken::new();
        cancel_after(&token, 10);

        assert!(executor.execute(token).await.unwrap_err().is_cancelled());
        assert!(!captured.contents().contains("Exiting normally."));
    }

    #[tokio::test]
    async fn test_crash_mode_fails() {
        let (executor, captured) = executor(WorkerMode::Crash, ScriptedInput::default());

        let err = executor.execute(CancellationToken::new()).await.unwrap_err();

        assert!(!err.is_cancelled());
        assert!(err.to_string().contains("Intentional crash"));
        assert_eq!(captured.lines(), vec!["Crashing now..."]);
    }

    #[tokio::test]
    async fn test_spam_mode_uses_template() {
        let (executor, captured) = executor(WorkerMode::Spam, ScriptedInput::default());
        let token = CancellationToken::new();
        cancel_after(&token, 35);

        assert!(executor.execute(token).await.is_err());
        assert!(captured.contents().contains("Spam message #1"));
    }

    #[tokio::test]
    async fn test_echo_mode_echoes_then_waits() {
        let (executor, captured) = executor(WorkerMode::Echo, ScriptedInput::new(["one", "two"]));
        let token = CancellationToken::new();
        cancel_after(&token, 30);

        assert!(executor.execute(token).await.unwrap_err().is_cancelled());
        let lines = captured.lines();
        assert_eq!(&lines[1..], &["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn test_precancelled_run_prints_only_hint() {
        let (executor, captured) = executor(WorkerMode::Run, ScriptedInput::default());
        let token = CancellationToken::new();
        token.cancel();

        assert!(executor.execute(token).await.unwrap_err().is_cancelled());
        assert!(!captured.contents().contains("Heartbeat"));
    }
}
