//! Custom action lookup.
//!
//! Actions are matched before selection resolution: a key that also looks
//! like an index or a named key still dispatches to the action.

use log::warn;

use super::resolver::{SelectionKeys, keys_equal};
use crate::domain::MenuAction;
use crate::error::{DemoKitError, Result};

/// Ordered, case-insensitive table of custom menu actions.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    actions: Vec<MenuAction>,
}

impl ActionTable {
    /// Validate and build the table.
    ///
    /// Empty and duplicate keys are rejected. Keys that shadow the quit key,
    /// the run-all key or a scenario index are accepted with a warning.
    pub fn new(actions: Vec<MenuAction>, keys: &SelectionKeys, scenario_count: usize) -> Result<Self> {
        for (i, action) in actions.iter().enumerate() {
            let key = action.key().trim();
            if key.is_empty() {
                return Err(DemoKitError::InvalidAction(format!(
                    "action '{}' has an empty key",
                    action.label()
                )));
            }

            if actions[..i].iter().any(|earlier| keys_equal(earlier.key(), key)) {
                return Err(DemoKitError::InvalidAction(format!("duplicate key '{}'", key)));
            }

            if keys_equal(key, &keys.quit) || keys_equal(key, &keys.run_all) {
                warn!("Menu action key '{}' shadows a built-in menu key", key);
            }
            if key
                .parse::<usize>()
                .is_ok_and(|index| (1..=scenario_count).contains(&index))
            {
                warn!("Menu action key '{}' shadows a scenario index", key);
            }
        }

        Ok(Self { actions })
    }

    pub fn actions(&self) -> &[MenuAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Find the action whose key equals the trimmed input, ignoring case.
    pub fn lookup(&self, raw: Option<&str>) -> Option<&MenuAction> {
        let input = raw?.trim();
        if input.is_empty() {
            return None;
        }
        self.actions.iter().find(|a| keys_equal(a.key(), input))
    }
}
