//! Resolved meaning of one line of menu input.

use std::fmt;
use std::sync::Arc;

use super::unit::Scenario;

/// A menu selection. Constructed only through the factory functions so the
/// invariants hold: exit implies valid, invalid implies no units.
#[derive(Clone)]
pub struct Selection {
    valid: bool,
    exit_requested: bool,
    units: Vec<Arc<dyn Scenario>>,
    raw_input: Option<String>,
}

impl Selection {
    /// Input that maps to nothing runnable.
    pub fn invalid(raw_input: Option<String>) -> Self {
        Self {
            valid: false,
            exit_requested: false,
            units: Vec::new(),
            raw_input,
        }
    }

    /// Input that asks the loop to end.
    pub fn exit(raw_input: Option<String>) -> Self {
        Self {
            valid: true,
            exit_requested: true,
            units: Vec::new(),
            raw_input,
        }
    }

    /// Input that selects one or more units to run.
    pub fn run(units: Vec<Arc<dyn Scenario>>, raw_input: Option<String>) -> Self {
        Self {
            valid: true,
            exit_requested: false,
            units,
            raw_input,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn units(&self) -> &[Arc<dyn Scenario>] {
        &self.units
    }

    pub fn raw_input(&self) -> Option<&str> {
        self.raw_input.as_deref()
    }

    /// Names of the selected units, in order.
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name()).collect()
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("valid", &self.valid)
            .field("exit_requested", &self.exit_requested)
            .field("units", &self.unit_names())
            .field("raw_input", &self.raw_input)
            .finish()
    }
}
