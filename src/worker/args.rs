//! Worker argument record and its command-line grammar.

use std::fmt;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use colored::Color;

use crate::error::{DemoKitError, Result};

/// Behavior the worker runs for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WorkerMode {
    /// Heartbeat messages until cancelled
    #[default]
    Run,
    /// Wait, then exit normally
    Exit,
    /// Fail on purpose
    Crash,
    /// Numbered messages until cancelled
    Spam,
    /// Echo input lines until cancelled
    Echo,
    /// Animated ASCII banner until cancelled
    Art,
}

impl fmt::Display for WorkerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerMode::Run => "Run",
            WorkerMode::Exit => "Exit",
            WorkerMode::Crash => "Crash",
            WorkerMode::Spam => "Spam",
            WorkerMode::Echo => "Echo",
            WorkerMode::Art => "Art",
        };
        write!(f, "{}", name)
    }
}

#[derive(Parser, Debug)]
#[command(name = "worker", no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct WorkerArgs {
    #[arg(long, value_enum, ignore_case = true, default_value_t = WorkerMode::Run)]
    mode: WorkerMode,

    /// Message interval in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Exit delay in seconds
    #[arg(long = "exit-after", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    exit_after: u64,

    #[arg(long, default_value = "white", value_parser = parse_color)]
    color: Color,
}

fn parse_color(value: &str) -> std::result::Result<Color, String> {
    Color::from_str(value).map_err(|_| format!("unknown color '{}'", value))
}

/// Parsed, validated worker arguments. Consumed once by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgsOptions {
    pub mode: WorkerMode,
    pub interval_ms: u64,
    pub exit_after_secs: u64,
    pub color: Color,
}

impl Default for ArgsOptions {
    fn default() -> Self {
        Self {
            mode: WorkerMode::Run,
            interval_ms: 1000,
            exit_after_secs: 5,
            color: Color::White,
        }
    }
}

/// Result of parsing: the options plus one warning per ignored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub options: ArgsOptions,
    pub warnings: Vec<String>,
}

const VALUE_FLAGS: &[&str] = &["--mode", "--interval", "--exit-after", "--color"];

/// Parse raw worker arguments (without a program name).
///
/// Unknown tokens do not fail the parse; each becomes an
/// `Unknown argument: X` warning. Bad or missing values for known flags are
/// `InvalidArgs` errors.
pub fn parse_args<I, S>(args: I) -> Result<ParsedArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let (known, warnings) = partition_known(args.into_iter().map(Into::into));
    let parsed = WorkerArgs::try_parse_from(&known).map_err(|e| DemoKitError::InvalidArgs(first_line(&e.to_string())))?;

    Ok(ParsedArgs {
        options: ArgsOptions {
            mode: parsed.mode,
            interval_ms: parsed.interval,
            exit_after_secs: parsed.exit_after,
            color: parsed.color,
        },
        warnings,
    })
}

/// Split tokens into known flags (with their values) and warnings for the rest.
fn partition_known(mut args: impl Iterator<Item = String>) -> (Vec<String>, Vec<String>) {
    let mut known = Vec::new();
    let mut warnings = Vec::new();

    while let Some(arg) = args.next() {
        let flag = arg.split_once('=').map_or(arg.as_str(), |(flag, _)| flag);
        if !VALUE_FLAGS.contains(&flag) {
            warnings.push(format!("Unknown argument: {}", arg));
            continue;
        }

        let inline_value = arg.contains('=');
        known.push(arg);
        if !inline_value && let Some(value) = args.next() {
            known.push(value);
        }
    }

    (known, warnings)
}

fn first_line(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}
