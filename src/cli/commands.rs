//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - menu: interactive scenario menu (the default)
//! - worker: run the console worker once with raw worker arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DemoKit - interactive console demos with per-run cancellation
#[derive(Parser, Debug)]
#[command(name = "demokit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show the interactive scenario menu
    Menu,

    /// Run the console demo worker
    ///
    /// Worker arguments: --mode run|exit|crash|spam|echo|art, --interval <ms>,
    /// --exit-after <s>, --color <name>
    Worker {
        /// Raw arguments passed to the worker
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
