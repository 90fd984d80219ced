#![allow(clippy::doc_markdown)] // Allow technical terms like ObjID, JRMP in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # RMG Core
//!
//! Action dispatch and remote object model for a Java RMI enumeration and
//! attack tool.
//!
//! ## Overview
//!
//! The crate sits between a command line frontend and an opaque protocol
//! runtime. The frontend picks an action, the registry validates the
//! supplied options against that action's legal set, and the bound handler
//! runs. Handlers obtain raw remote handles from the runtime, classify them
//! into typed wrappers and, where a callable endpoint is needed, normalize
//! them through the activation lifecycle.
//!
//! ## Module Organization
//!
//! - [`operations`] - Action table, registry and dispatcher
//! - [`options`] - Option catalog and per-invocation values
//! - [`remote`] - Reference classifier, wrappers and activation lifecycle
//! - [`response`] - Recursive rendering of method call results
//! - [`protocol`] - Data exchanged with the protocol runtime
//! - [`endpoints`] - Catalog of well-known remote interfaces
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rmg_core::config::ConfigLoader;
//! use rmg_core::endpoints::KnownEndpointCatalog;
//! use rmg_core::operations::{Action, ActionRegistry, Dispatcher};
//! use rmg_core::options::{OptionValue, OptionValues, RmgOption};
//! use rmg_core::protocol::OfflineRuntime;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ActionRegistry::standard()?;
//! let values = OptionValues::new().with(RmgOption::ObjidObjid, OptionValue::Text("2".into()));
//! registry.validate_options(Action::Objid, values.supplied())?;
//!
//! let dispatcher = Dispatcher::new(
//!     Action::Objid,
//!     values,
//!     ConfigLoader::new().load()?,
//!     Arc::new(OfflineRuntime),
//!     Arc::new(KnownEndpointCatalog::builtin()?),
//! );
//! registry.invoke(Action::Objid, &dispatcher)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod operations;
pub mod options;
pub mod output;
pub mod protocol;
pub mod remote;
pub mod response;

pub use config::{ConfigLoader, RmgConfig};
pub use endpoints::{KnownEndpoint, KnownEndpointCatalog};
pub use error::{ErrorCategory, Result, RmgError};
pub use operations::{Action, ActionDescriptor, ActionRegistry, Dispatcher};
pub use options::{OptionValue, OptionValues, RmgOption};
pub use protocol::{OfflineRuntime, ProtocolRuntime, RemoteHandle, ResponseValue};
pub use remote::{classify, RemoteObject, UnicastObject};
pub use response::ResponseVisitor;
