//! Menu loop - the interactive driver.
//!
//! Each iteration: check cancellation, render, read one line, then either
//! run a custom action or resolve the line and dispatch the selection.

use std::sync::Arc;

use log::{debug, info};
use tokio_util::sync::CancellationToken;

use super::actions::ActionTable;
use super::render::Renderer;
use super::resolver::{SelectionKeys, resolve};
use crate::config::MenuOptions;
use crate::coordination::ScopeSlot;
use crate::domain::{MenuAction, Scenario};
use crate::error::{DemoKitError, Result};
use crate::input::LineReader;
use crate::runner::ScenarioRunner;

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Prompting,
    Dispatching,
    Paused,
    Exited,
}

/// Repeatedly prompts for a selection and dispatches it.
pub struct MenuLoop<I: LineReader> {
    options: MenuOptions,
    keys: SelectionKeys,
    input: I,
    renderer: Arc<dyn Renderer>,
    runner: ScenarioRunner,
    state: MenuState,
}

impl<I: LineReader> MenuLoop<I> {
    pub fn new(options: MenuOptions, input: I, renderer: Arc<dyn Renderer>, slot: ScopeSlot) -> Self {
        let keys = SelectionKeys::from(&options);
        let runner = ScenarioRunner::new(renderer.clone(), slot);
        Self {
            options,
            keys,
            input,
            renderer,
            runner,
            state: MenuState::Prompting,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Give back the input source, e.g. to inspect unread lines.
    pub fn into_input(self) -> I {
        self.input
    }

    /// Run until quit, end of input, or cancellation of `outer`.
    ///
    /// Returns `Err(DemoKitError::Cancelled)` when `outer` fires; scenario
    /// failures never surface here.
    pub async fn run(
        &mut self,
        scenarios: &[Arc<dyn Scenario>],
        actions: Vec<MenuAction>,
        outer: &CancellationToken,
    ) -> Result<()> {
        let table = ActionTable::new(actions, &self.keys, scenarios.len())?;
        info!(
            "Menu loop started with {} scenarios and {} actions",
            scenarios.len(),
            table.actions().len()
        );

        let result = self.drive(scenarios, &table, outer).await;
        self.state = MenuState::Exited;

        match &result {
            Ok(()) => info!("Menu loop exited"),
            Err(e) => info!("Menu loop stopped: {}", e),
        }
        result
    }

    async fn drive(
        &mut self,
        scenarios: &[Arc<dyn Scenario>],
        table: &ActionTable,
        outer: &CancellationToken,
    ) -> Result<()> {
        loop {
            if outer.is_cancelled() {
                return Err(DemoKitError::Cancelled);
            }

            self.state = MenuState::Prompting;
            self.renderer.print_header();
            self.renderer.print_menu(scenarios, table.actions());
            self.renderer.print_prompt();

            let line = self.read_line(outer).await?;

            // Custom actions take precedence over every other interpretation
            if let Some(action) = table.lookup(line.as_deref()) {
                info!("Menu action '{}' selected", action.key());
                action.invoke();
                self.pause(outer).await?;
                continue;
            }

            let selection = resolve(line.as_deref(), scenarios, &self.keys);
            debug!("Resolved selection: {:?}", selection);

            if !selection.is_valid() {
                self.renderer.print_invalid_selection();
                if self.options.pause_after_scenarios {
                    self.pause(outer).await?;
                }
                continue;
            }

            if selection.exit_requested() {
                return Ok(());
            }

            self.state = MenuState::Dispatching;
            self.runner.run_many(selection.units(), outer).await;

            if self.options.pause_after_scenarios {
                self.pause(outer).await?;
            }
        }
    }

    async fn pause(&mut self, outer: &CancellationToken) -> Result<()> {
        self.state = MenuState::Paused;
        self.renderer.print_pause_prompt();
        self.read_line(outer).await?;
        Ok(())
    }

    async fn read_line(&mut self, outer: &CancellationToken) -> Result<Option<String>> {
        tokio::select! {
            biased;
            _ = outer.cancelled() => Err(DemoKitError::Cancelled),
            line = self.input.read_line() => line,
        }
    }
}
