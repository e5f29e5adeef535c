use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use demokit::config::DemoConfig;
use demokit::domain::MenuAction;
use demokit::menu::DemoEngine;
use demokit::scenarios;
use demokit::worker::ConsoleDemoWorker;

const LOG_ENV: &str = "RUST_LOG";

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("demokit")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("demokit.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os(LOG_ENV).is_none() {
        // Narrowed to the configured level once config is loaded
        builder.filter_level(LevelFilter::Trace);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn apply_log_level(cli: &Cli, config: &DemoConfig) {
    if std::env::var_os(LOG_ENV).is_some() {
        return;
    }
    let level = if cli.is_verbose() {
        LevelFilter::Debug
    } else {
        config
            .log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(LevelFilter::Info)
    };
    log::set_max_level(level);
}

async fn run_application(cli: &Cli, config: &DemoConfig) -> Result<i32> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None | Some(Commands::Menu) => run_menu(config).await.map(|_| 0),
        Some(Commands::Worker { args }) => run_worker(args, config).await,
    }
}

async fn run_menu(config: &DemoConfig) -> Result<()> {
    info!("Launching demo menu");
    let scenarios = scenarios::builtin(scenarios::console_output());
    let actions = vec![MenuAction::new("I", "About", || {
        println!("{} {}", env!("CARGO_PKG_NAME").cyan().bold(), env!("CARGO_PKG_VERSION"));
        println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    })];

    let engine = DemoEngine::new(config.menu.clone());
    engine.run(&scenarios, actions).await.context("Demo menu failed")?;
    Ok(())
}

async fn run_worker(args: &[String], config: &DemoConfig) -> Result<i32> {
    info!("Launching console worker with args {:?}", args);
    let worker = ConsoleDemoWorker::new(config.worker.clone(), args.iter().cloned());
    let code = worker.run().await.context("Worker failed")?;
    Ok(code)
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = DemoConfig::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(&cli, &config);

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let result = runtime.block_on(run_application(&cli, &config));
    // A cancelled stdin read leaves a blocking thread parked until the next
    // line arrives; do not wait for it.
    runtime.shutdown_background();

    let code = result.context("Application failed")?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
