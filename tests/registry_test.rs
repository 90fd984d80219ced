mod common;

use common::*;
use proptest::prelude::*;
use rmg_core::operations::{Action, ActionRegistry, ACTION_TABLE};
use rmg_core::options::RmgOption;
use rmg_core::RmgError;
use std::collections::HashSet;

proptest! {
    /// Property: resolution ignores the case of the action name
    #[test]
    fn resolution_is_case_insensitive((action, name) in case_varied_name()) {
        let registry = ActionRegistry::standard().unwrap();
        let canonical = registry.resolve(action.name()).unwrap();
        let varied = registry.resolve(&name).unwrap();

        prop_assert_eq!(canonical.action(), varied.action());
        prop_assert_eq!(canonical.handler_name(), varied.handler_name());
    }

    /// Property: contains_option agrees with the declared legal set
    #[test]
    fn contains_option_matches_legal_set(action in action_strategy(), option in option_strategy()) {
        let registry = ActionRegistry::standard().unwrap();
        let legal = registry.legal_options(action);

        prop_assert_eq!(registry.contains_option(action, option), legal.contains(&option));
        prop_assert_eq!(
            registry.validate_options(action, [option]).is_ok(),
            legal.contains(&option)
        );
    }
}

#[test]
fn test_every_table_entry_binds() {
    let registry = ActionRegistry::standard().unwrap();

    assert_eq!(registry.len(), ACTION_TABLE.len());
    let actions: Vec<Action> = registry.actions().iter().map(|d| d.action()).collect();
    let table: Vec<Action> = ACTION_TABLE.iter().map(|entry| entry.action).collect();
    assert_eq!(actions, table);

    let unique: HashSet<Action> = actions.iter().copied().collect();
    assert_eq!(unique.len(), Action::ALL.len());
}

#[test]
fn test_legal_option_lists_have_no_duplicates() {
    for entry in ACTION_TABLE {
        let unique: HashSet<RmgOption> = entry.options.iter().copied().collect();
        assert_eq!(unique.len(), entry.options.len(), "duplicate option in {}", entry.action);

        let flags: Vec<&str> = entry.options.iter().map(|option| option.name()).collect();
        let distinct: HashSet<&str> = flags.iter().copied().collect();
        assert_eq!(distinct.len(), flags.len(), "ambiguous option name in {}", entry.action);
    }
}

#[test]
fn test_known_accepts_only_offline_options() {
    let registry = ActionRegistry::standard().unwrap();

    assert!(registry.contains_option(Action::Known, RmgOption::KnownClass));
    assert!(!registry.contains_option(Action::Known, RmgOption::TargetHost));

    match registry.validate_options(Action::Known, [RmgOption::KnownClass, RmgOption::Threads]) {
        Err(RmgError::IllegalOption { option, action }) => {
            assert_eq!(option, RmgOption::Threads);
            assert_eq!(action, Action::Known);
        }
        other => panic!("expected illegal option, got {other:?}"),
    }
}

#[test]
fn test_unknown_action_name() {
    let registry = ActionRegistry::standard().unwrap();
    assert!(registry.resolve("portscan").is_none());
    assert!(registry.resolve("").is_none());
}
