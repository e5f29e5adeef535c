//! Demo engine - wires the menu loop to the console and the interrupt listener.

use std::sync::Arc;

use log::info;
use tokio_util::sync::CancellationToken;

use super::menu_loop::MenuLoop;
use super::render::{ConsoleRenderer, Renderer};
use crate::config::MenuOptions;
use crate::coordination::{CancelCoordinator, CancelPolicy, ExitHook, ScopeSlot};
use crate::domain::{MenuAction, Scenario};
use crate::error::Result;
use crate::input::{LineReader, StdinReader};

/// Runs the interactive demo menu.
pub struct DemoEngine {
    options: MenuOptions,
    slot: ScopeSlot,
    exit_hook: Option<ExitHook>,
}

impl DemoEngine {
    pub fn new(options: MenuOptions) -> Self {
        Self {
            options,
            slot: ScopeSlot::new(),
            exit_hook: None,
        }
    }

    /// Replace process exit on an idle Ctrl+C, e.g. when embedded in a host.
    pub fn with_exit_hook(mut self, hook: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.exit_hook = Some(Arc::new(hook));
        self
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// The engine's active-scope slot.
    pub fn slot(&self) -> &ScopeSlot {
        &self.slot
    }

    /// Run against stdin and stdout until the user quits.
    pub async fn run(&self, scenarios: &[Arc<dyn Scenario>], actions: Vec<MenuAction>) -> Result<()> {
        let renderer = Arc::new(ConsoleRenderer::new(self.options.clone()));
        self.run_with(scenarios, actions, StdinReader::stdin(), renderer, &CancellationToken::new())
            .await
    }

    /// Run with explicit collaborators.
    ///
    /// The interrupt listener (if enabled) lives exactly as long as this call.
    pub async fn run_with<I: LineReader>(
        &self,
        scenarios: &[Arc<dyn Scenario>],
        actions: Vec<MenuAction>,
        input: I,
        renderer: Arc<dyn Renderer>,
        outer: &CancellationToken,
    ) -> Result<()> {
        self.options.validate()?;

        let mut coordinator = CancelCoordinator::new(CancelPolicy::from(&self.options), self.slot.clone());
        if let Some(hook) = &self.exit_hook {
            let hook = hook.clone();
            coordinator = coordinator.with_exit_hook(move |code| hook(code));
        }
        let _registration = coordinator.register();

        info!("Demo engine starting: {}", self.options.title);
        let mut menu = MenuLoop::new(self.options.clone(), input, renderer, self.slot.clone());
        menu.run(scenarios, actions, outer).await
    }
}
