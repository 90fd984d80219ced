//! # Options
//!
//! The option catalog and the per-invocation values the frontend collects.

pub mod catalog;
pub mod values;

pub use catalog::{OptionDescriptor, OptionGroup, RmgOption, ValueKind};
pub use values::{OptionValue, OptionValues};
