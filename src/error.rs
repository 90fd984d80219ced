//! # Error Types
//!
//! Unified error handling for the action registry, the remote reference
//! classifier and every handler reachable through the dispatcher.

use crate::operations::Action;
use crate::options::RmgOption;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RmgError>;

#[derive(Debug, Error)]
pub enum RmgError {
    /// Static action table names a handler the dispatcher does not provide
    #[error("Action '{action}' is bound to unknown handler '{handler}'")]
    UnboundHandler { action: Action, handler: String },

    /// The protocol runtime returned a reference kind outside the known set
    #[error("Unexpected reference type: {kind}")]
    UnexpectedReferenceType { kind: String },

    #[error("Introspection of {context} failed: {reason}")]
    Introspection { context: String, reason: String },

    /// An empty (bound-name only) object reached a dereferencing operation
    #[error("Remote object for bound name '{bound_name}' was never resolved")]
    EmptyObjectDereference { bound_name: String },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("The option {} is not supported for action {action}", .option.name())]
    IllegalOption { option: RmgOption, action: Action },

    #[error("The action {action} requires the {} option", .option.name())]
    MissingOption { option: RmgOption, action: Action },

    #[error("Invalid value '{value}' for {}: {reason}", .option.name())]
    InvalidOptionValue {
        option: RmgOption,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Protocol runtime error during {operation}: {reason}")]
    Runtime { operation: String, reason: String },

    #[error("Operation not supported by the protocol runtime: {operation}")]
    Unsupported { operation: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad classification used by the frontend to decide how much detail to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Table defects or collaborator contract violations
    Internal,
    /// Invalid action, option or configuration supplied by the user
    Usage,
    /// Failures reported by the protocol runtime or the environment
    Runtime,
}

impl RmgError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RmgError::UnboundHandler { .. }
            | RmgError::UnexpectedReferenceType { .. }
            | RmgError::Introspection { .. }
            | RmgError::EmptyObjectDereference { .. } => ErrorCategory::Internal,
            RmgError::UnknownAction(_)
            | RmgError::IllegalOption { .. }
            | RmgError::MissingOption { .. }
            | RmgError::InvalidOptionValue { .. }
            | RmgError::Configuration(_) => ErrorCategory::Usage,
            RmgError::Runtime { .. }
            | RmgError::Unsupported { .. }
            | RmgError::Io(_)
            | RmgError::Json(_) => ErrorCategory::Runtime,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::Internal
    }

    /// Create an introspection error
    pub fn introspection(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Introspection {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a protocol runtime error
    pub fn runtime(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Runtime {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }
}

impl From<config::ConfigError> for RmgError {
    fn from(error: config::ConfigError) -> Self {
        RmgError::Configuration(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let internal = RmgError::UnexpectedReferenceType {
            kind: "x.FooRef".to_string(),
        };
        assert!(internal.is_internal());

        let usage = RmgError::IllegalOption {
            option: RmgOption::ConnSsl,
            action: Action::Known,
        };
        assert_eq!(usage.category(), ErrorCategory::Usage);

        let runtime = RmgError::runtime("lookup", "connection refused");
        assert_eq!(runtime.category(), ErrorCategory::Runtime);
    }

    #[test]
    fn test_illegal_option_names_option_and_action() {
        let error = RmgError::IllegalOption {
            option: RmgOption::ConnSsl,
            action: Action::Known,
        };
        assert_eq!(
            error.to_string(),
            "The option --ssl is not supported for action known"
        );
    }
}
