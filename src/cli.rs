//! # Command Line Frontend
//!
//! Builds the clap command tree from the action registry: one subcommand
//! per action, its positional arguments and flags taken from the option
//! catalog and grouped under the catalog's help headings. Options outside an
//! action's legal set are registered hidden, so an inapplicable option is
//! reported by [`ActionRegistry::validate_options`] rather than by clap.
//! Parsed matches are converted back into [`OptionValues`].

use crate::error::{Result, RmgError};
use crate::operations::{Action, ActionDescriptor, ActionRegistry};
use crate::options::{OptionValue, OptionValues, RmgOption, ValueKind};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;

/// A resolved action together with the values supplied for it
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub action: Action,
    pub values: OptionValues,
}

pub fn build_command(registry: &ActionRegistry) -> Command {
    registry.actions().iter().fold(
        Command::new("rmg")
            .about("Java RMI enumeration and attack tool")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true),
        |command, descriptor| command.subcommand(action_command(descriptor)),
    )
}

fn action_command(descriptor: &ActionDescriptor) -> Command {
    let mut command = Command::new(descriptor.name())
        .about(descriptor.description())
        .override_usage(usage_line(descriptor));

    if !descriptor.arguments().is_empty() {
        command = command.after_help(format!("Arguments: {}", descriptor.arguments()));
    }

    let mut index = 1;
    for (option, hidden) in registered_options(descriptor) {
        command = command.arg(option_arg(option, hidden, &mut index));
    }

    command
}

/// Options registered on an action's subcommand: the legal set in table
/// order, then every other named option, hidden from help. Catalog entries
/// sharing a long flag with an earlier registration are skipped.
fn registered_options(descriptor: &ActionDescriptor) -> Vec<(RmgOption, bool)> {
    let mut registered: Vec<(RmgOption, bool)> =
        descriptor.options().iter().map(|option| (*option, false)).collect();

    for option in RmgOption::ALL {
        let Some(long) = option.long_flag() else {
            continue;
        };
        if !registered.iter().any(|(taken, _)| taken.long_flag() == Some(long)) {
            registered.push((*option, true));
        }
    }

    registered
}

/// `rmg <action> <positionals in binding order> [OPTIONS]`
fn usage_line(descriptor: &ActionDescriptor) -> String {
    let shape = descriptor.arguments().to_ascii_lowercase();
    let mut usage = format!("rmg {}", descriptor.name());

    for positional in descriptor.positionals() {
        let name = positional.name();
        let optional = shape.contains(&format!("[{name}")) || shape.contains(&format!("[<{name}"));

        let rendered = if positional.kind().is_list() {
            format!(" [{name} ...]")
        } else if optional {
            format!(" [{name}]")
        } else {
            format!(" <{name}>")
        };
        usage.push_str(&rendered);
    }

    usage.push_str(" [OPTIONS]");
    usage
}

fn option_arg(option: RmgOption, hidden: bool, index: &mut usize) -> Arg {
    let descriptor = option.descriptor();
    let arg = Arg::new(option.id())
        .help(descriptor.help)
        .help_heading(descriptor.group.heading())
        .hide(hidden);
    let arg = match descriptor.kind {
        ValueKind::Flag => arg,
        _ => arg.value_parser(value_parser!(String)),
    };

    if descriptor.positional {
        let arg = arg.index(*index).value_name(descriptor.name);
        *index += 1;
        return if descriptor.kind.is_list() {
            arg.num_args(0..).action(ArgAction::Append)
        } else {
            arg
        };
    }

    let arg = match option.long_flag() {
        Some(long) => arg.long(long),
        None => arg,
    };

    match descriptor.kind {
        ValueKind::Flag => arg.action(ArgAction::SetTrue),
        ValueKind::TextList | ValueKind::IntegerList => {
            arg.num_args(1..).action(ArgAction::Append)
        }
        _ => arg.action(ArgAction::Set),
    }
}

/// Lower-case the action token so action names resolve case-insensitively
pub fn normalize_action<I, T>(registry: &ActionRegistry, args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if let Some(token) = args.get_mut(1) {
        let resolved = token
            .to_str()
            .and_then(|name| registry.resolve(name))
            .map(ActionDescriptor::name);
        if let Some(name) = resolved {
            *token = OsString::from(name);
        }
    }

    args
}

/// Options present in the matches of one action subcommand
pub fn supplied_options(descriptor: &ActionDescriptor, matches: &ArgMatches) -> Vec<RmgOption> {
    registered_options(descriptor)
        .into_iter()
        .map(|(option, _)| option)
        .filter(|option| match option.kind() {
            ValueKind::Flag => matches.get_flag(option.id()),
            _ => matches.contains_id(option.id()),
        })
        .collect()
}

/// Convert the matches of one action subcommand into option values
pub fn collect_values(descriptor: &ActionDescriptor, matches: &ArgMatches) -> Result<OptionValues> {
    let mut values = OptionValues::new();

    for option in supplied_options(descriptor, matches) {
        let id = option.id();
        match option.kind() {
            ValueKind::Flag => {
                values.set(option, OptionValue::Flag(true));
            }
            ValueKind::TextList | ValueKind::IntegerList => {
                if let Some(raw) = matches.get_many::<String>(id) {
                    let joined = raw.map(String::as_str).collect::<Vec<_>>().join(" ");
                    values.set(option, OptionValue::parse(option, &joined)?);
                }
            }
            _ => {
                if let Some(raw) = matches.get_one::<String>(id) {
                    values.set(option, OptionValue::parse(option, raw)?);
                }
            }
        }
    }

    Ok(values)
}

/// Resolve the chosen subcommand, reject options the action does not
/// accept, then parse the supplied values
pub fn invocation(registry: &ActionRegistry, matches: &ArgMatches) -> Result<Invocation> {
    let (name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| RmgError::UnknownAction(String::new()))?;

    let descriptor = registry
        .resolve(name)
        .ok_or_else(|| RmgError::UnknownAction(name.to_string()))?;

    registry.validate_options(descriptor.action(), supplied_options(descriptor, sub_matches))?;
    let values = collect_values(descriptor, sub_matches)?;

    Ok(Invocation {
        action: descriptor.action(),
        values,
    })
}
