//! CLI module for demokit - command-line interface and subcommands.
//!
//! Provides the main entry point with the menu and worker subcommands.

pub mod commands;

pub use commands::Cli;
