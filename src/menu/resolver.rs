//! Selection resolver.
//!
//! Turns one raw line of menu input into a `Selection`. Pure: no I/O, no
//! state. Rules are applied in order and the first match wins.

use std::sync::Arc;

use crate::config::MenuOptions;
use crate::domain::{Scenario, Selection};

/// The named keys the resolver recognises besides scenario indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionKeys {
    pub quit: String,
    pub run_all: String,
}

impl SelectionKeys {
    pub fn new(quit: impl Into<String>, run_all: impl Into<String>) -> Self {
        Self {
            quit: quit.into(),
            run_all: run_all.into(),
        }
    }
}

impl From<&MenuOptions> for SelectionKeys {
    fn from(options: &MenuOptions) -> Self {
        Self::new(options.quit_key.clone(), options.run_all_key.clone())
    }
}

/// Case-insensitive equality of two trimmed keys.
pub fn keys_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Resolve `raw` against the known scenarios.
///
/// 1. `None` (end of input) exits.
/// 2. Blank input is invalid.
/// 3. The quit key exits.
/// 4. The run-all key selects every scenario in order.
/// 5. An integer in `1..=len` selects that scenario.
/// 6. Anything else is invalid.
pub fn resolve(raw: Option<&str>, scenarios: &[Arc<dyn Scenario>], keys: &SelectionKeys) -> Selection {
    let Some(raw) = raw else {
        return Selection::exit(None);
    };

    let input = raw.trim();
    if input.is_empty() {
        return Selection::invalid(Some(raw.to_string()));
    }

    let captured = Some(input.to_string());

    if keys_equal(input, &keys.quit) {
        return Selection::exit(captured);
    }

    if keys_equal(input, &keys.run_all) {
        return Selection::run(scenarios.to_vec(), captured);
    }

    match input.parse::<usize>() {
        Ok(index) if (1..=scenarios.len()).contains(&index) => {
            Selection::run(vec![scenarios[index - 1].clone()], captured)
        }
        _ => Selection::invalid(captured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UnitResult;
    use async_trait::async_trait;
    use tokio_util::sync::CancellationToken;

    struct Named(String);

    #[async_trait]
    impl Scenario for Named {
        fn name(&self) -> &str {
            &self.0
        }

        async fn run(&self, _cancel: CancellationToken) -> UnitResult {
            Ok(())
        }
    }

    fn units(names: &[&str]) -> Vec<Arc<dyn Scenario>> {
        names
            .iter()
            .map(|n| Arc::new(Named(n.to_string())) as Arc<dyn Scenario>)
            .collect()
    }

    fn keys() -> SelectionKeys {
        SelectionKeys::new("Q", "A")
    }

    #[test]
    fn test_end_of_input_exits() {
        let sel = resolve(None, &units(&["One"]), &keys());
        assert!(sel.is_valid());
        assert!(sel.exit_requested());
        assert!(sel.units().is_empty());
        assert_eq!(sel.raw_input(), None);
    }

    #[test]
    fn test_blank_input_is_invalid() {
        for raw in ["", " ", "\t", "   \t  "] {
            let sel = resolve(Some(raw), &units(&["One"]), &keys());
            assert!(!sel.is_valid(), "{:?} should be invalid", raw);
            assert!(sel.units().is_empty());
        }
    }

    #[test]
    fn test_quit_key_any_case_and_padding() {
        let all = units(&["One", "Two", "Three"]);
        for raw in ["Q", "q", " q ", "\tQ\n"] {
            let sel = resolve(Some(raw), &all, &keys());
            assert!(sel.is_valid());
            assert!(sel.exit_requested());
            assert!(sel.units().is_empty());
        }
    }

    #[test]
    fn test_run_all_selects_everything_in_order() {
        let all = units(&["A", "B", "C"]);
        let sel = resolve(Some("a"), &all, &keys());
        assert!(sel.is_valid());
        assert!(!sel.exit_requested());
        assert_eq!(sel.unit_names(), vec!["A", "B", "C"]);
        assert_eq!(sel.raw_input(), Some("a"));
    }

    #[test]
    fn test_run_all_with_no_scenarios_is_valid_and_empty() {
        let sel = resolve(Some("A"), &[], &keys());
        assert!(sel.is_valid());
        assert!(sel.units().is_empty());
    }

    #[test]
    fn test_every_index_in_range_selects_that_unit() {
        let all = units(&["One", "Two", "Three", "Four"]);
        for i in 1..=all.len() {
            let sel = resolve(Some(&i.to_string()), &all, &keys());
            assert!(sel.is_valid());
            assert!(!sel.exit_requested());
            assert_eq!(sel.units().len(), 1);
            assert!(Arc::ptr_eq(&sel.units()[0], &all[i - 1]));
        }
    }

    #[test]
    fn test_second_of_two() {
        let sel = resolve(Some("2"), &units(&["One", "Two"]), &keys());
        assert_eq!(sel.unit_names(), vec!["Two"]);
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        let all = units(&["One"]);
        for raw in ["0", "2", "99", "-1", "18446744073709551616"] {
            let sel = resolve(Some(raw), &all, &keys());
            assert!(!sel.is_valid(), "{:?} should be invalid", raw);
            assert!(sel.units().is_empty());
        }
    }

    #[test]
    fn test_non_numeric_non_key_is_invalid() {
        let all = units(&["One", "Two"]);
        for raw in ["x", "quit", "all", "1a", "1.0", "QQ"] {
            let sel = resolve(Some(raw), &all, &keys());
            assert!(!sel.is_valid(), "{:?} should be invalid", raw);
            assert!(!sel.exit_requested());
        }
    }

    #[test]
    fn test_no_partial_key_matching() {
        let keys = SelectionKeys::new("quit", "all");
        let sel = resolve(Some("qui"), &units(&["One"]), &keys);
        assert!(!sel.is_valid());
        let sel = resolve(Some("QUIT"), &units(&["One"]), &keys);
        assert!(sel.exit_requested());
    }

    #[test]
    fn test_keys_from_options() {
        let keys = SelectionKeys::from(&MenuOptions::default());
        assert_eq!(keys, SelectionKeys::new("Q", "A"));
    }
}
