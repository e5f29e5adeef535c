//! Interactive menu
//!
//! This module provides:
//! - resolve: raw input to Selection
//! - ActionTable: custom actions checked before resolution
//! - MenuLoop: the prompt/dispatch state machine
//! - Renderer: output surface, with console and recording implementations
//! - DemoEngine: console wiring plus the Ctrl+C listener

pub mod actions;
pub mod engine;
pub mod menu_loop;
pub mod render;
pub mod resolver;

pub use actions::ActionTable;
pub use engine::DemoEngine;
pub use menu_loop::{MenuLoop, MenuState};
pub use render::{ConsoleRenderer, RecordingRenderer, RenderEvent, Renderer};
pub use resolver::{SelectionKeys, keys_equal, resolve};
