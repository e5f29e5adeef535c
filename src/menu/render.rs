//! Menu and scenario output.
//!
//! The core never formats text itself beyond handing data to a `Renderer`.
//! `ConsoleRenderer` writes to stdout; `RecordingRenderer` captures calls for
//! tests and embedding hosts.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use colored::*;
use crossterm::{cursor, execute, terminal};

use crate::config::MenuOptions;
use crate::domain::{MenuAction, Scenario, UnitFailure};

/// Output surface for the menu loop and the scenario runner.
pub trait Renderer: Send + Sync {
    fn print_header(&self);
    fn print_menu(&self, scenarios: &[Arc<dyn Scenario>], actions: &[MenuAction]);
    fn print_prompt(&self);
    fn print_invalid_selection(&self);
    fn print_pause_prompt(&self);
    fn print_scenario_header(&self, name: &str);
    fn print_scenario_footer(&self);
    fn print_cancelled(&self);
    fn print_unexpected_error(&self, failure: &UnitFailure);
}

/// Renders to the process console.
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    options: MenuOptions,
}

impl ConsoleRenderer {
    pub fn new(options: MenuOptions) -> Self {
        Self { options }
    }

    fn try_clear() {
        // Output may be redirected; clearing is cosmetic.
        let _ = execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        );
    }

    fn separator_block(&self, title: &str) {
        println!();
        println!("{}", self.options.separator_line.dimmed());
        println!("{}", title.bold());
        println!("{}", self.options.separator_line.dimmed());
        println!();
    }
}

impl Renderer for ConsoleRenderer {
    fn print_header(&self) {
        if self.options.clear_screen_on_header {
            Self::try_clear();
        }

        println!("{}", self.options.header_border_line.cyan());
        println!(" {} ", self.options.title.bold());
        println!("{}", self.options.header_border_line.cyan());
        println!();
    }

    fn print_menu(&self, scenarios: &[Arc<dyn Scenario>], actions: &[MenuAction]) {
        for (i, scenario) in scenarios.iter().enumerate() {
            println!("{}. {}", (i + 1).to_string().green(), scenario.name());
        }

        println!();
        println!("{}. {}", self.options.run_all_key.green(), self.options.run_all_label);
        for action in actions {
            println!("{}. {}", action.key().green(), action.label());
        }
        println!("{}. {}", self.options.quit_key.green(), self.options.quit_label);
        println!();
    }

    fn print_prompt(&self) {
        print!("{}", self.options.menu_prompt);
        let _ = io::stdout().flush();
    }

    fn print_invalid_selection(&self) {
        println!("{}", self.options.invalid_selection_message.red());
    }

    fn print_pause_prompt(&self) {
        println!("{}", self.options.pause_prompt.dimmed());
    }

    fn print_scenario_header(&self, name: &str) {
        self.separator_block(&self.options.scenario_header(name));
    }

    fn print_scenario_footer(&self) {
        self.separator_block(&self.options.scenario_footer_title);
    }

    fn print_cancelled(&self) {
        println!();
        println!("{}", self.options.scenario_cancelled_message.yellow());
    }

    fn print_unexpected_error(&self, failure: &UnitFailure) {
        println!();
        println!("{}", self.options.unexpected_error_header.red().bold());
        println!("{}: {}", failure.category.red(), failure.message);
    }
}

/// One captured renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Header,
    Menu { scenarios: Vec<String>, actions: Vec<String> },
    Prompt,
    InvalidSelection,
    PausePrompt,
    ScenarioHeader(String),
    ScenarioFooter,
    Cancelled,
    UnexpectedError(UnitFailure),
}

/// Captures renderer calls in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything rendered so far.
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn count(&self, wanted: &RenderEvent) -> usize {
        self.events().iter().filter(|e| *e == wanted).count()
    }

    fn push(&self, event: RenderEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Renderer for RecordingRenderer {
    fn print_header(&self) {
        self.push(RenderEvent::Header);
    }

    fn print_menu(&self, scenarios: &[Arc<dyn Scenario>], actions: &[MenuAction]) {
        self.push(RenderEvent::Menu {
            scenarios: scenarios.iter().map(|s| s.name().to_string()).collect(),
            actions: actions.iter().map(|a| a.key().to_string()).collect(),
        });
    }

    fn print_prompt(&self) {
        self.push(RenderEvent::Prompt);
    }

    fn print_invalid_selection(&self) {
        self.push(RenderEvent::InvalidSelection);
    }

    fn print_pause_prompt(&self) {
        self.push(RenderEvent::PausePrompt);
    }

    fn print_scenario_header(&self, name: &str) {
        self.push(RenderEvent::ScenarioHeader(name.to_string()));
    }

    fn print_scenario_footer(&self) {
        self.push(RenderEvent::ScenarioFooter);
    }

    fn print_cancelled(&self) {
        self.push(RenderEvent::Cancelled);
    }

    fn print_unexpected_error(&self, failure: &UnitFailure) {
        self.push(RenderEvent::UnexpectedError(failure.clone()));
    }
}
