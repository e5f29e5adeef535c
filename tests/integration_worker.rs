//! Worker integration tests
//!
//! Runs the console worker through its public entry point with in-memory output.

use std::sync::Arc;
use std::time::Duration;

use demokit::DemoKitError;
use demokit::config::WorkerOptions;
use demokit::coordination::ScopeSlot;
use demokit::worker::{
    ArgsOptions, CapturedOutput, ConsoleDemoWorker, OutputHelper, WorkerMode, WorkerModeExecutor, WorkerRunner,
};
use tokio_util::sync::CancellationToken;

fn captured_worker(args: &[&str]) -> (ConsoleDemoWorker, CapturedOutput) {
    let captured = CapturedOutput::new();
    let sink = captured.clone();
    let worker = ConsoleDemoWorker::new(WorkerOptions::default(), args.iter().copied())
        .with_output(move |color| OutputHelper::with_writer(color, sink.clone()))
        .without_interrupt_handler();
    (worker, captured)
}

#[tokio::test]
async fn test_worker_runs_once() {
    let (worker, captured) = captured_worker(&["--mode", "exit", "--exit-after", "1"]);

    assert_eq!(worker.run().await.unwrap(), 0);
    assert!(matches!(worker.run().await, Err(DemoKitError::Usage(_))));
    assert_eq!(captured.contents().matches("Console demo worker started").count(), 1);
}

#[tokio::test]
async fn test_invalid_arguments_exit_with_one() {
    let (worker, captured) = captured_worker(&["--color", "plaid"]);

    assert_eq!(worker.run().await.unwrap(), 1);
    assert!(!captured.contents().contains("Console demo worker started"));
}

#[tokio::test]
async fn test_crash_mode_surfaces_error() {
    let (worker, captured) = captured_worker(&["--mode", "crash"]);

    let err = worker.run().await.unwrap_err();

    assert!(matches!(err, DemoKitError::ModeFailed(_)));
    assert!(captured.contents().contains("Crashing now..."));
}

#[tokio::test]
async fn test_interrupted_spam_exits_zero() {
    let captured = CapturedOutput::new();
    let output = OutputHelper::with_writer(colored::Color::Yellow, captured.clone());
    let args = ArgsOptions {
        mode: WorkerMode::Spam,
        interval_ms: 5,
        ..ArgsOptions::default()
    };
    let executor = Arc::new(WorkerModeExecutor::new(args, WorkerOptions::default(), output.clone()));
    let slot = ScopeSlot::new();
    let runner = WorkerRunner::new(WorkerOptions::default(), args, output, executor)
        .with_slot(slot.clone())
        .without_interrupt_handler();

    // Stand-in for Ctrl+C: cancel whatever scope is published
    let interrupter = slot.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        while !interrupter.cancel_active() {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    });

    let code = runner.run_with(&CancellationToken::new()).await.unwrap();

    assert_eq!(code, 0);
    let contents = captured.contents();
    assert!(contents.contains("Mode: Spam"));
    assert!(contents.contains("Spam message #1"));
    assert!(contents.trim_end().ends_with("Worker cancelled."));
    assert!(!slot.is_active());
}
