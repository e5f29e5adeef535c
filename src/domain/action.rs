//! Custom menu actions bound to a key.

use std::fmt;
use std::sync::Arc;

/// A side effect available from the menu alongside the numbered scenarios.
#[derive(Clone)]
pub struct MenuAction {
    key: String,
    label: String,
    effect: Arc<dyn Fn() + Send + Sync>,
}

impl MenuAction {
    pub fn new(key: impl Into<String>, label: impl Into<String>, effect: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            effect: Arc::new(effect),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the action's effect.
    pub fn invoke(&self) {
        (self.effect)();
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAction")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
