//! # rmg
//!
//! Command line entry point. Builds the action registry, parses the command
//! line into a validated invocation, layers configuration and runs the bound
//! handler against the offline protocol runtime.

use anyhow::Context;
use rmg_core::cli;
use rmg_core::config::ConfigLoader;
use rmg_core::endpoints::KnownEndpointCatalog;
use rmg_core::logging::{init_logging, log_error};
use rmg_core::operations::{ActionRegistry, Dispatcher};
use rmg_core::options::RmgOption;
use rmg_core::protocol::OfflineRuntime;
use rmg_core::RmgError;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy)]
struct ErrorDisplay {
    verbose: bool,
    stack_trace: bool,
}

fn main() -> ExitCode {
    let mut display = ErrorDisplay::default();

    match run(&mut display) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, display);
            ExitCode::FAILURE
        }
    }
}

fn run(display: &mut ErrorDisplay) -> anyhow::Result<()> {
    let registry = ActionRegistry::standard().context("Action table is inconsistent")?;

    let args = cli::normalize_action(&registry, std::env::args_os());
    let matches = cli::build_command(&registry).get_matches_from(args);
    let invocation = cli::invocation(&registry, &matches)?;
    let values = invocation.values;

    display.stack_trace = values.flag(RmgOption::GlobalStackTrace);
    display.verbose = values.flag(RmgOption::GlobalVerbose);

    let loader = match values.path(RmgOption::GlobalConfig) {
        Some(path) => ConfigLoader::new().with_file(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;

    display.stack_trace |= config.output.stack_trace;
    display.verbose |= config.output.verbose;

    let color = !(values.flag(RmgOption::GlobalNoColor) || config.output.no_color);
    init_logging(display.verbose, color);

    if let Some(plugin) = values.path(RmgOption::GlobalPlugin) {
        warn!(plugin = %plugin.display(), "Plugins are not supported by this build; ignoring");
    }

    let catalog = match &config.known_endpoints {
        Some(path) => KnownEndpointCatalog::load(path)?,
        None => KnownEndpointCatalog::builtin()?,
    };

    let action = invocation.action;
    let dispatcher = Dispatcher::new(
        action,
        values,
        config,
        Arc::new(OfflineRuntime),
        Arc::new(catalog),
    );

    registry.invoke(action, &dispatcher)?;
    Ok(())
}

fn report(err: &anyhow::Error, display: ErrorDisplay) {
    let internal = err
        .downcast_ref::<RmgError>()
        .map(RmgError::is_internal)
        .unwrap_or(true);

    log_error("rmg", "run", &err.to_string(), None);

    if internal && !(display.verbose || display.stack_trace) {
        eprintln!("[-] Internal error: caught unexpected exception during the operation.");
        eprintln!("[-] Use --stack-trace or --verbose for details.");
        return;
    }

    eprintln!("[-] {err}");
    if display.stack_trace {
        for cause in err.chain().skip(1) {
            eprintln!("[-]     caused by: {cause}");
        }
    }
}
