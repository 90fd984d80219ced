//! # Structured Logging Module
//!
//! Console diagnostics on stderr through `tracing`. Report output for the
//! user goes through [`crate::output::Printer`] instead.

use crate::constants::{LOG_ENV_VAR, LOG_FORMAT_ENV_VAR};
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging once per process. Later calls are no-ops.
pub fn init_logging(verbose: bool, color: bool) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let directive = get_log_level(std::env::var(LOG_ENV_VAR).ok().as_deref(), verbose);
        let json = is_json_format(std::env::var(LOG_FORMAT_ENV_VAR).ok().as_deref());

        let console = (!json).then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(verbose)
                .with_level(true)
                .with_ansi(color)
                .with_filter(EnvFilter::new(directive.clone()))
        });

        let structured = json.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new(directive.clone()))
        });

        let subscriber = tracing_subscriber::registry().with(console).with(structured);

        // A host application may already own the global subscriber
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing");
        }

        tracing::debug!(filter = %directive, json, "Logging initialized");
    });
}

fn is_json_format(from_env: Option<&str>) -> bool {
    from_env.is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
}

/// Filter directive: explicit environment value, else debug when verbose, else warn
fn get_log_level(from_env: Option<&str>, verbose: bool) -> String {
    match from_env {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ if verbose => "debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Log structured data for dispatched actions
pub fn log_action_operation(action: &str, handler: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        action = %action,
        handler = %handler,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "ACTION_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level(None, false), "warn");
        assert_eq!(get_log_level(None, true), "debug");
        assert_eq!(get_log_level(Some("rmg_core=trace"), false), "rmg_core=trace");
        assert_eq!(get_log_level(Some("  "), true), "debug");
    }

    #[test]
    fn test_json_format_selection() {
        assert!(is_json_format(Some("json")));
        assert!(is_json_format(Some(" JSON ")));
        assert!(!is_json_format(Some("pretty")));
        assert!(!is_json_format(None));
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging(false, false);
        init_logging(true, false);
    }
}
