//! Proptest strategies for action names and option identities.

use proptest::prelude::*;
use rmg_core::operations::Action;
use rmg_core::options::RmgOption;

pub fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

pub fn option_strategy() -> impl Strategy<Value = RmgOption> {
    prop::sample::select(RmgOption::ALL.to_vec())
}

/// The action's name with every letter's case chosen at random
pub fn case_varied_name() -> impl Strategy<Value = (Action, String)> {
    action_strategy().prop_flat_map(|action| {
        let len = action.name().len();
        prop::collection::vec(any::<bool>(), len).prop_map(move |upper| {
            let name = action
                .name()
                .chars()
                .zip(upper)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
                .collect::<String>();
            (action, name)
        })
    })
}
