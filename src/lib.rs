//! DemoKit - interactive console demos with per-run cancellation
//!
//! A menu of runnable scenarios and a single-mode console worker, both
//! sharing one Ctrl+C coordinator that cancels whatever is currently running
//! and leaves the menu, the batch and the process intact.

pub mod config;
pub mod coordination;
pub mod domain;
pub mod error;
pub mod input;
pub mod menu;
pub mod runner;
pub mod scenarios;
pub mod worker;

pub use error::{DemoKitError, Result};
