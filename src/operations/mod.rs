//! # Operations
//!
//! The declarative action table, the registry that binds it to handlers and
//! the dispatcher those handlers run against.
//!
//! ## Architecture
//!
//! ```text
//! Operations
//! ├── action      (Action identity + static ACTION_TABLE)
//! ├── registry    (ActionRegistry: resolve, validate, invoke)
//! ├── dispatcher  (merged configuration, runtime, catalog, printer)
//! └── handlers    (one dispatch_* method per action)
//! ```
//!
//! ## Flow
//!
//! The frontend resolves an action name, validates the supplied options
//! against the action's legal set and only then invokes the handler. No
//! handler runs with an option its action does not declare.

pub mod action;
pub mod dispatcher;
mod handlers;
pub mod registry;

pub use action::{Action, ActionEntry, ACTION_TABLE};
pub use dispatcher::{Dispatcher, Handler};
pub use registry::{ActionDescriptor, ActionRegistry};
