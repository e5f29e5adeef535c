//! Interrupt coordination module
//!
//! Routes an external interrupt (Ctrl+C) either to the currently running
//! scope or to process termination, decided at signal time.

pub mod signals;

pub use signals::*;
