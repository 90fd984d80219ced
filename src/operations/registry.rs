//! # Action Registry
//!
//! Binds every entry of the action table to a dispatcher handler, once, when
//! the registry is built. A table entry naming a handler the dispatcher does
//! not provide is a defect and fails the build of the registry before any
//! action runs.
//!
//! ## Usage
//!
//! ```rust
//! use rmg_core::operations::{Action, ActionRegistry};
//! use rmg_core::options::RmgOption;
//!
//! let registry = ActionRegistry::standard().unwrap();
//! let descriptor = registry.resolve("ENUM").unwrap();
//! assert_eq!(descriptor.action(), Action::Enum);
//! assert!(registry.contains_option(Action::Enum, RmgOption::Activation));
//! assert!(!registry.contains_option(Action::Known, RmgOption::ConnSsl));
//! ```

use super::action::{Action, ActionEntry, ACTION_TABLE};
use super::dispatcher::{Dispatcher, Handler};
use crate::error::{Result, RmgError};
use crate::logging::log_action_operation;
use crate::options::RmgOption;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// An action bound to its handler
#[derive(Clone, Copy)]
pub struct ActionDescriptor {
    action: Action,
    handler_name: &'static str,
    handler: Handler,
    arguments: &'static str,
    description: &'static str,
    options: &'static [RmgOption],
}

impl ActionDescriptor {
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn name(&self) -> &'static str {
        self.action.name()
    }

    pub fn handler_name(&self) -> &'static str {
        self.handler_name
    }

    /// Positional argument shape shown in usage lines
    pub fn arguments(&self) -> &'static str {
        self.arguments
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn options(&self) -> &'static [RmgOption] {
        self.options
    }

    pub fn contains_option(&self, option: RmgOption) -> bool {
        self.options.contains(&option)
    }

    /// Positional options in binding order
    pub fn positionals(&self) -> impl Iterator<Item = RmgOption> + '_ {
        self.options.iter().copied().filter(RmgOption::is_positional)
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("action", &self.action)
            .field("handler", &self.handler_name)
            .field("options", &self.options.len())
            .finish()
    }
}

/// Immutable set of bound actions, in table order
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
    by_action: HashMap<Action, usize>,
}

impl ActionRegistry {
    /// The built-in action table bound against the dispatcher's handlers
    pub fn standard() -> Result<Self> {
        Self::build(ACTION_TABLE, Dispatcher::HANDLERS)
    }

    /// Bind `entries` against `handlers`. Fails on the first entry whose
    /// handler name is missing.
    pub fn build(entries: &[ActionEntry], handlers: &[(&'static str, Handler)]) -> Result<Self> {
        let mut descriptors = Vec::with_capacity(entries.len());
        let mut by_action = HashMap::with_capacity(entries.len());

        for entry in entries {
            let handler = handlers
                .iter()
                .find(|(name, _)| *name == entry.handler)
                .map(|(_, handler)| *handler)
                .ok_or_else(|| RmgError::UnboundHandler {
                    action: entry.action,
                    handler: entry.handler.to_string(),
                })?;

            by_action.entry(entry.action).or_insert(descriptors.len());
            descriptors.push(ActionDescriptor {
                action: entry.action,
                handler_name: entry.handler,
                handler,
                arguments: entry.arguments,
                description: entry.description,
                options: entry.options,
            });
        }

        debug!(actions = descriptors.len(), "Action registry built");
        Ok(Self {
            descriptors,
            by_action,
        })
    }

    /// Case-insensitive lookup of an action by name
    pub fn resolve(&self, name: &str) -> Option<&ActionDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.name().eq_ignore_ascii_case(name))
    }

    pub fn get(&self, action: Action) -> Option<&ActionDescriptor> {
        self.by_action
            .get(&action)
            .map(|index| &self.descriptors[*index])
    }

    /// All bound actions in table order
    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn legal_options(&self, action: Action) -> &'static [RmgOption] {
        self.get(action)
            .map(ActionDescriptor::options)
            .unwrap_or_default()
    }

    pub fn contains_option(&self, action: Action, option: RmgOption) -> bool {
        self.legal_options(action).contains(&option)
    }

    /// Reject the first supplied option that is not legal for `action`
    pub fn validate_options<I>(&self, action: Action, supplied: I) -> Result<()>
    where
        I: IntoIterator<Item = RmgOption>,
    {
        let legal = self.legal_options(action);
        match supplied.into_iter().find(|option| !legal.contains(option)) {
            Some(option) => Err(RmgError::IllegalOption { option, action }),
            None => Ok(()),
        }
    }

    /// Run the handler bound to `action`
    pub fn invoke(&self, action: Action, dispatcher: &Dispatcher) -> Result<()> {
        let descriptor = self
            .get(action)
            .ok_or_else(|| RmgError::UnknownAction(action.name().to_string()))?;

        log_action_operation(action.name(), descriptor.handler_name, "started", None);
        let result = (descriptor.handler)(dispatcher);

        match &result {
            Ok(()) => log_action_operation(action.name(), descriptor.handler_name, "completed", None),
            Err(err) => log_action_operation(
                action.name(),
                descriptor.handler_name,
                "failed",
                Some(&err.to_string()),
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_binds_every_action() {
        let registry = ActionRegistry::standard().unwrap();
        assert_eq!(registry.len(), Action::ALL.len());

        for action in Action::ALL {
            let descriptor = registry.get(*action).unwrap();
            assert_eq!(descriptor.action(), *action);
            assert!(descriptor.handler_name().starts_with("dispatch_"));
        }
    }

    #[test]
    fn test_missing_handler_is_reported() {
        let entries = [ActionEntry {
            action: Action::Scan,
            handler: "dispatch_nothing",
            arguments: "",
            description: "",
            options: &[],
        }];

        match ActionRegistry::build(&entries, Dispatcher::HANDLERS) {
            Err(RmgError::UnboundHandler { action, handler }) => {
                assert_eq!(action, Action::Scan);
                assert_eq!(handler, "dispatch_nothing");
            }
            other => panic!("expected unbound handler, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = ActionRegistry::standard().unwrap();
        let action_of = |name: &str| registry.resolve(name).map(ActionDescriptor::action);
        assert_eq!(action_of("RogueJMX"), Some(Action::RogueJmx));
        assert_eq!(action_of("known"), Some(Action::Known));
        assert!(registry.resolve("nope").is_none());
    }

    #[test]
    fn test_validate_options_reports_first_illegal() {
        let registry = ActionRegistry::standard().unwrap();

        assert!(registry
            .validate_options(Action::Known, [RmgOption::KnownClass])
            .is_ok());

        match registry.validate_options(Action::Known, [RmgOption::KnownClass, RmgOption::ConnSsl]) {
            Err(RmgError::IllegalOption { option, action }) => {
                assert_eq!(option, RmgOption::ConnSsl);
                assert_eq!(action, Action::Known);
            }
            other => panic!("expected illegal option, got {other:?}"),
        }
    }

    #[test]
    fn test_positionals_follow_table_order() {
        let registry = ActionRegistry::standard().unwrap();
        let bind: Vec<_> = registry.get(Action::Bind).unwrap().positionals().collect();
        assert_eq!(
            bind,
            vec![
                RmgOption::TargetHost,
                RmgOption::TargetPort,
                RmgOption::BindAddress,
                RmgOption::BindGadgetName
            ]
        );
    }
}
