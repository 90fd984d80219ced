//! # Option Catalog
//!
//! Every configuration option the tool understands, declared once. Positional
//! options carry a bare name (`host`), flags and valued options carry their
//! long form (`--ssl`). Action descriptors reference options by identity.

use serde::Serialize;
use std::fmt;

/// Help group an option is rendered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionGroup {
    Target,
    Connection,
    Global,
    Action,
    Ssrf,
    Payload,
    Guess,
    Listener,
    Scan,
}

impl OptionGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            OptionGroup::Target => "target arguments",
            OptionGroup::Connection => "connection arguments",
            OptionGroup::Global => "global arguments",
            OptionGroup::Action => "action arguments",
            OptionGroup::Ssrf => "ssrf arguments",
            OptionGroup::Payload => "payload arguments",
            OptionGroup::Guess => "guess arguments",
            OptionGroup::Listener => "listener arguments",
            OptionGroup::Scan => "scan arguments",
        }
    }
}

/// Shape of the value an option accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Flag,
    Integer,
    Text,
    Path,
    TextList,
    IntegerList,
}

impl ValueKind {
    pub fn is_list(&self) -> bool {
        matches!(self, ValueKind::TextList | ValueKind::IntegerList)
    }
}

/// Immutable description of a single option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub group: OptionGroup,
    pub kind: ValueKind,
    pub positional: bool,
    pub help: &'static str,
}

macro_rules! option_catalog {
    ($($variant:ident => ($name:literal, $group:ident, $kind:ident, $positional:literal, $help:literal)),+ $(,)?) => {
        /// Identity of a configuration option
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum RmgOption {
            $($variant),+
        }

        impl RmgOption {
            /// All options in declaration order
            pub const ALL: &'static [RmgOption] = &[$(RmgOption::$variant),+];

            pub fn descriptor(&self) -> OptionDescriptor {
                match self {
                    $(RmgOption::$variant => OptionDescriptor {
                        name: $name,
                        group: OptionGroup::$group,
                        kind: ValueKind::$kind,
                        positional: $positional,
                        help: $help,
                    }),+
                }
            }

            /// Stable identifier, unique across the whole catalog
            pub fn id(&self) -> &'static str {
                match self {
                    $(RmgOption::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

option_catalog! {
    TargetHost => ("host", Target, Text, true, "target host"),
    TargetPort => ("port", Target, Integer, true, "target port"),
    TargetBoundName => ("--bound-name", Target, Text, false, "bound name of the targeted remote object"),
    TargetObjid => ("--objid", Target, Text, false, "ObjID of the targeted remote object"),
    TargetSignature => ("--signature", Target, Text, false, "method signature to target"),
    TargetComponent => ("--component", Target, Text, false, "default RMI component to target (act, dgc, reg)"),

    GlobalConfig => ("--config", Global, Path, false, "path to a configuration file"),
    GlobalNoColor => ("--no-color", Global, Flag, false, "disable colored output"),
    GlobalPlugin => ("--plugin", Global, Path, false, "plugin to load"),
    GlobalStackTrace => ("--stack-trace", Global, Flag, false, "display stack traces for caught exceptions"),
    GlobalVerbose => ("--verbose", Global, Flag, false, "enable verbose output"),
    Threads => ("--threads", Global, Integer, false, "maximum number of worker threads"),
    NoProgress => ("--no-progress", Global, Flag, false, "disable the progress bar"),

    ConnSsl => ("--ssl", Connection, Flag, false, "use SSL for connections"),
    ConnFollow => ("--follow", Connection, Flag, false, "follow redirects to different servers"),
    ForceActivation => ("--force-activation", Connection, Flag, false, "activate activatable objects even when a live reference exists"),
    SocketFactory => ("--socket-factory", Connection, Text, false, "client socket factory class to use"),
    SocketFactorySsl => ("--socket-factory-ssl", Connection, Flag, false, "enforce SSL for connections from socket factories"),
    SocketFactoryPlain => ("--socket-factory-plain", Connection, Flag, false, "enforce plaintext for connections from socket factories"),

    Ssrf => ("--ssrf", Ssrf, Flag, false, "print an SSRF payload instead of contacting the server"),
    SsrfGopher => ("--gopher", Ssrf, Flag, false, "print the SSRF payload as gopher URL"),
    SsrfResponse => ("--ssrf-response", Ssrf, Text, false, "evaluate an SSRF response"),
    SsrfEncode => ("--encode", Ssrf, Flag, false, "URL encode the SSRF payload"),
    SsrfRaw => ("--raw", Ssrf, Flag, false, "print the SSRF payload in raw format"),
    SsrfStreamProtocol => ("--stream-protocol", Ssrf, Flag, false, "use the stream protocol for SSRF payloads"),

    BindAddress => ("listener", Action, Text, true, "address:port the bound object points to"),
    BindGadgetName => ("object", Action, Text, true, "object to bind (defaults to a JMX server stub)"),
    BindGadgetCmd => ("--bind-gadget-cmd", Action, Text, false, "command for the bound gadget"),
    BindBoundName => ("--bound-name", Action, Text, false, "bound name to use for (re|un)bind"),
    BindObjid => ("--bind-objid", Action, Text, false, "ObjID of the bound object"),
    BindBypass => ("--localhost-bypass", Action, Flag, false, "attempt the localhost bypass"),
    CallArguments => ("arguments", Action, Text, true, "argument string for the method call"),
    GenericPrint => ("--show-response", Action, Flag, false, "print the method call response"),
    CodebaseClass => ("classname", Action, Text, true, "class name to load"),
    CodebaseUrl => ("url", Action, Text, true, "codebase URL to use"),
    EnumAction => ("scan-action", Action, TextList, true, "scan actions to perform during enum"),
    EnumBypass => ("--localhost-bypass", Action, Flag, false, "attempt the localhost bypass during enum"),
    DgcMethod => ("--dgc-method", Action, Text, false, "DGC method to use (clean, dirty)"),
    RegMethod => ("--registry-method", Action, Text, false, "registry method to use (bind, lookup, rebind, unbind)"),
    Activation => ("--activate", Action, Flag, false, "activate activatable objects during enum"),
    KnownClass => ("classname", Action, Text, true, "class name of the known endpoint"),
    ObjidObjid => ("objid", Action, Text, true, "ObjID to display"),

    GadgetName => ("gadget", Payload, Text, true, "gadget name to use"),
    GadgetCmd => ("command", Payload, Text, true, "command for the gadget"),
    Yso => ("--yso", Payload, Path, false, "location of the ysoserial jar"),
    ArgumentPos => ("--position", Payload, Integer, false, "argument position to inject the payload"),
    SerialVersionUid => ("--serial-version-uid", Payload, Integer, false, "serialVersionUID for the remote stub"),
    PayloadSerialVersionUid => ("--payload-serial-version-uid", Payload, Integer, false, "serialVersionUID for the payload class"),

    GuessWordlistFile => ("--wordlist-file", Guess, Path, false, "wordlist file for method guessing"),
    GuessWordlistFolder => ("--wordlist-folder", Guess, Path, false, "folder containing wordlist files"),
    GuessCreateSamples => ("--create-samples", Guess, Flag, false, "create sample code for identified methods"),
    GuessSampleFolder => ("--sample-folder", Guess, Path, false, "folder for created samples"),
    GuessTemplateFolder => ("--template-folder", Guess, Path, false, "folder containing sample templates"),
    GuessTrusted => ("--trusted", Guess, Flag, false, "disable bound name filtering"),
    GuessForceGuessing => ("--force-guessing", Guess, Flag, false, "guess known endpoints as well"),
    GuessDuplicates => ("--guess-duplicates", Guess, Flag, false, "guess duplicate remote classes"),
    GuessUpdate => ("--update", Guess, Flag, false, "update wordlists with identified methods"),
    GuessZeroArg => ("--zero-arg", Guess, Flag, false, "guess methods without arguments"),

    ListenIp => ("ip", Listener, Text, true, "IP address to listen on"),
    ListenPort => ("port", Listener, Integer, true, "port to listen on"),
    RoguejmxObjid => ("--objid", Listener, Text, false, "ObjID of the rogue JMX server"),
    RoguejmxForwardHost => ("forward-host", Listener, Text, true, "host to forward incoming JMX connections to"),
    RoguejmxForwardPort => ("--forward-port", Listener, Integer, false, "port to forward incoming JMX connections to"),
    RoguejmxForwardBoundName => ("--forward-bound-name", Listener, Text, false, "bound name of the forwarded JMX server"),
    RoguejmxForwardObjid => ("--forward-objid", Listener, Text, false, "ObjID of the forwarded JMX server"),

    ScanHost => ("host", Scan, Text, true, "host to scan"),
    ScanPorts => ("ports", Scan, IntegerList, true, "ports to scan"),
    ScanTimeoutConnect => ("--timeout-connect", Scan, Integer, false, "connect timeout in milliseconds"),
    ScanTimeoutRead => ("--timeout-read", Scan, Integer, false, "read timeout in milliseconds"),
}

impl RmgOption {
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn group(&self) -> OptionGroup {
        self.descriptor().group
    }

    pub fn kind(&self) -> ValueKind {
        self.descriptor().kind
    }

    pub fn is_positional(&self) -> bool {
        self.descriptor().positional
    }

    /// Long flag without leading dashes, `None` for positionals
    pub fn long_flag(&self) -> Option<&'static str> {
        self.name().strip_prefix("--")
    }
}

impl fmt::Display for RmgOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
