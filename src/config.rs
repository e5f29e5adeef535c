use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DemoKitError;
use crate::menu::keys_equal;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub log_level: Option<String>,
    pub menu: MenuOptions,
    pub worker: WorkerOptions,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            menu: MenuOptions::default(),
            worker: WorkerOptions::default(),
        }
    }
}

/// Text and behavior switches for the interactive menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    pub title: String,
    pub header_border_line: String,
    pub separator_line: String,
    pub menu_prompt: String,
    pub run_all_key: String,
    pub run_all_label: String,
    pub quit_key: String,
    pub quit_label: String,
    pub invalid_selection_message: String,
    pub scenario_cancelled_message: String,
    pub unexpected_error_header: String,
    /// `{0}` is replaced with the scenario name
    pub scenario_header_format: String,
    pub scenario_footer_title: String,
    pub pause_prompt: String,
    pub clear_screen_on_header: bool,
    pub pause_after_scenarios: bool,
    /// Install the Ctrl+C listener while the menu runs
    pub handle_cancel_key_press: bool,
    /// Terminate the process on Ctrl+C when no scenario is running.
    /// Turn this off when the menu is embedded in a larger host.
    pub exit_on_cancel_when_idle: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            title: "Demo Scenarios".to_string(),
            header_border_line: "=".repeat(40),
            separator_line: "-".repeat(40),
            menu_prompt: "Select a scenario: ".to_string(),
            run_all_key: "A".to_string(),
            run_all_label: "Run all scenarios".to_string(),
            quit_key: "Q".to_string(),
            quit_label: "Quit".to_string(),
            invalid_selection_message: "Invalid selection.".to_string(),
            scenario_cancelled_message: "Scenario cancelled.".to_string(),
            unexpected_error_header: "An unexpected error occurred:".to_string(),
            scenario_header_format: " Running scenario: {0}".to_string(),
            scenario_footer_title: " Scenario completed".to_string(),
            pause_prompt: "Press Enter to continue...".to_string(),
            clear_screen_on_header: true,
            pause_after_scenarios: true,
            handle_cancel_key_press: true,
            exit_on_cancel_when_idle: true,
        }
    }
}

impl MenuOptions {
    /// Options for non-interactive use: no screen clearing, no pauses, no signal listener.
    pub fn headless() -> Self {
        Self {
            clear_screen_on_header: false,
            pause_after_scenarios: false,
            handle_cancel_key_press: false,
            ..Self::default()
        }
    }

    /// Reject key sets the resolver cannot tell apart.
    pub fn validate(&self) -> std::result::Result<(), DemoKitError> {
        let quit = self.quit_key.trim();
        let run_all = self.run_all_key.trim();
        if quit.is_empty() {
            return Err(DemoKitError::Config("menu.quit_key must not be empty".to_string()));
        }
        if run_all.is_empty() {
            return Err(DemoKitError::Config("menu.run_all_key must not be empty".to_string()));
        }
        if keys_equal(quit, run_all) {
            return Err(DemoKitError::Config(format!(
                "menu.quit_key and menu.run_all_key are both '{}'",
                quit
            )));
        }
        Ok(())
    }

    pub fn scenario_header(&self, name: &str) -> String {
        self.scenario_header_format.replace("{0}", name)
    }
}

/// Text used by the console worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerOptions {
    pub worker_name: String,
    /// `{0}` is replaced with the heartbeat index
    pub run_message_template: String,
    /// `{0}` is replaced with the message index
    pub spam_message_template: String,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            worker_name: "Console Demo Worker".to_string(),
            run_message_template: "Heartbeat {0}".to_string(),
            spam_message_template: "Spam message #{0}".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Project-local file wins over the user config
        let local_config = PathBuf::from(format!("{}.yml", project_name));
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.menu.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_menu_defaults() {
        let menu = MenuOptions::default();
        assert_eq!(menu.run_all_key, "A");
        assert_eq!(menu.quit_key, "Q");
        assert!(menu.handle_cancel_key_press);
        assert!(menu.exit_on_cancel_when_idle);
        assert!(menu.validate().is_ok());
    }

    #[test]
    fn test_headless_disables_interaction() {
        let menu = MenuOptions::headless();
        assert!(!menu.clear_screen_on_header);
        assert!(!menu.pause_after_scenarios);
        assert!(!menu.handle_cancel_key_press);
        assert_eq!(menu.quit_key, "Q");
    }

    #[test]
    fn test_validate_rejects_same_keys() {
        let menu = MenuOptions {
            run_all_key: "q".to_string(),
            ..MenuOptions::default()
        };
        assert!(matches!(menu.validate(), Err(DemoKitError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_same_non_ascii_keys() {
        let menu = MenuOptions {
            quit_key: "É".to_string(),
            run_all_key: "é".to_string(),
            ..MenuOptions::default()
        };
        assert!(matches!(menu.validate(), Err(DemoKitError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let menu = MenuOptions {
            quit_key: "  ".to_string(),
            ..MenuOptions::default()
        };
        assert!(menu.validate().is_err());
    }

    #[test]
    fn test_scenario_header_format() {
        let menu = MenuOptions::default();
        assert_eq!(menu.scenario_header("Hello"), " Running scenario: Hello");
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("demokit.yml");
        fs::write(
            &path,
            r#"
log_level: debug
menu:
  title: "My Demo"
  quit_key: "X"
worker:
  worker_name: "Busy Bee"
"#,
        )
        .unwrap();

        let config = DemoConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.menu.title, "My Demo");
        assert_eq!(config.menu.quit_key, "X");
        // Unspecified fields fall back to defaults
        assert_eq!(config.menu.run_all_key, "A");
        assert_eq!(config.worker.worker_name, "Busy Bee");
        assert_eq!(config.worker.run_message_template, "Heartbeat {0}");
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(DemoConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_invalid_keys_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "menu:\n  quit_key: A\n").unwrap();
        assert!(DemoConfig::load(Some(&path)).is_err());
    }
}
