//! Declarative table of supported actions.
//!
//! Each entry names the dispatcher handler it binds to, the positional
//! argument shape and help text shown by the frontend, and the options that
//! are legal for the action. Positional options bind in the order they are
//! listed here.

use crate::options::RmgOption as O;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Bind,
    Call,
    Codebase,
    Enum,
    Guess,
    Known,
    Listen,
    Objid,
    Rebind,
    RogueJmx,
    Scan,
    Serial,
    Unbind,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::Bind,
        Action::Call,
        Action::Codebase,
        Action::Enum,
        Action::Guess,
        Action::Known,
        Action::Listen,
        Action::Objid,
        Action::Rebind,
        Action::RogueJmx,
        Action::Scan,
        Action::Serial,
        Action::Unbind,
    ];

    /// Lower-case name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Action::Bind => "bind",
            Action::Call => "call",
            Action::Codebase => "codebase",
            Action::Enum => "enum",
            Action::Guess => "guess",
            Action::Known => "known",
            Action::Listen => "listen",
            Action::Objid => "objid",
            Action::Rebind => "rebind",
            Action::RogueJmx => "roguejmx",
            Action::Scan => "scan",
            Action::Serial => "serial",
            Action::Unbind => "unbind",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one action before its handler is bound
#[derive(Debug, Clone, Copy)]
pub struct ActionEntry {
    pub action: Action,
    pub handler: &'static str,
    pub arguments: &'static str,
    pub description: &'static str,
    pub options: &'static [O],
}

pub const ACTION_TABLE: &[ActionEntry] = &[
    ActionEntry {
        action: Action::Bind,
        handler: "dispatch_bind",
        arguments: "[object] <listener>",
        description: "Binds an object to the registry that points to listener",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::BindAddress,
            O::BindGadgetName,
            O::BindBoundName,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalPlugin,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::Ssrf,
            O::SsrfGopher,
            O::SsrfResponse,
            O::SsrfEncode,
            O::SsrfRaw,
            O::SsrfStreamProtocol,
            O::BindBypass,
            O::BindObjid,
            O::BindGadgetCmd,
            O::Yso,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
        ],
    },
    ActionEntry {
        action: Action::Call,
        handler: "dispatch_call",
        arguments: "<arguments>",
        description: "Regularly calls a method with the specified arguments",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::CallArguments,
            O::TargetBoundName,
            O::TargetObjid,
            O::TargetSignature,
            O::TargetComponent,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalPlugin,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::ConnFollow,
            O::Ssrf,
            O::SsrfGopher,
            O::SsrfResponse,
            O::SsrfEncode,
            O::SsrfRaw,
            O::SsrfStreamProtocol,
            O::ForceActivation,
            O::SerialVersionUid,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
            O::GenericPrint,
        ],
    },
    ActionEntry {
        action: Action::Codebase,
        handler: "dispatch_codebase",
        arguments: "<classname> <url>",
        description: "Perform remote class loading attacks",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::CodebaseClass,
            O::CodebaseUrl,
            O::TargetBoundName,
            O::TargetObjid,
            O::TargetSignature,
            O::TargetComponent,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::ConnFollow,
            O::Ssrf,
            O::SsrfGopher,
            O::SsrfResponse,
            O::SsrfEncode,
            O::SsrfRaw,
            O::SsrfStreamProtocol,
            O::ArgumentPos,
            O::ForceActivation,
            O::SerialVersionUid,
            O::PayloadSerialVersionUid,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
        ],
    },
    ActionEntry {
        action: Action::Enum,
        handler: "dispatch_enum",
        arguments: "[scan-action ...]",
        description: "Enumerate common vulnerabilities on Java RMI endpoints",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::EnumAction,
            O::TargetBoundName,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::EnumBypass,
            O::ConnSsl,
            O::ConnFollow,
            O::Ssrf,
            O::SsrfGopher,
            O::SsrfResponse,
            O::SsrfEncode,
            O::SsrfRaw,
            O::SsrfStreamProtocol,
            O::DgcMethod,
            O::RegMethod,
            O::Activation,
            O::ForceActivation,
            O::SerialVersionUid,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
        ],
    },
    ActionEntry {
        action: Action::Guess,
        handler: "dispatch_guess",
        arguments: "",
        description: "Guess methods on bound names",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::TargetSignature,
            O::TargetBoundName,
            O::TargetObjid,
            O::TargetComponent,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::ConnFollow,
            O::GuessWordlistFile,
            O::GuessWordlistFolder,
            O::GuessCreateSamples,
            O::GuessSampleFolder,
            O::GuessTemplateFolder,
            O::GuessTrusted,
            O::GuessForceGuessing,
            O::GuessDuplicates,
            O::GuessUpdate,
            O::GuessZeroArg,
            O::Threads,
            O::NoProgress,
            O::ForceActivation,
            O::SerialVersionUid,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
        ],
    },
    ActionEntry {
        action: Action::Known,
        handler: "dispatch_known",
        arguments: "<className>",
        description: "Display details of known remote objects",
        options: &[O::KnownClass, O::GlobalNoColor, O::GlobalStackTrace],
    },
    ActionEntry {
        action: Action::Listen,
        handler: "dispatch_listen",
        arguments: "<gadget> <command>",
        description: "Open ysoserials JRMP listener",
        options: &[
            O::ListenIp,
            O::ListenPort,
            O::GadgetName,
            O::GadgetCmd,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::GlobalPlugin,
            O::Yso,
        ],
    },
    ActionEntry {
        action: Action::Objid,
        handler: "dispatch_objid",
        arguments: "<objid>",
        description: "Print information contained within an ObjID",
        options: &[
            O::ObjidObjid,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
        ],
    },
    ActionEntry {
        action: Action::Rebind,
        handler: "dispatch_rebind",
        arguments: "[object] <listener>",
        description: "Rebinds boundname as object that points to listener",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::BindAddress,
            O::BindGadgetName,
            O::BindBoundName,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalPlugin,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::Ssrf,
            O::SsrfGopher,
            O::SsrfResponse,
            O::SsrfEncode,
            O::SsrfRaw,
            O::SsrfStreamProtocol,
            O::BindBypass,
            O::BindObjid,
            O::BindGadgetCmd,
            O::Yso,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
        ],
    },
    ActionEntry {
        action: Action::RogueJmx,
        handler: "dispatch_rogue_jmx",
        arguments: "[forward-host]",
        description: "Creates a rogue JMX listener (collect credentials)",
        options: &[
            O::ListenIp,
            O::ListenPort,
            O::RoguejmxForwardHost,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::ConnFollow,
            O::RoguejmxObjid,
            O::RoguejmxForwardPort,
            O::RoguejmxForwardBoundName,
            O::RoguejmxForwardObjid,
        ],
    },
    ActionEntry {
        action: Action::Scan,
        handler: "dispatch_port_scan",
        arguments: "[<port> [<port>] ...]",
        description: "Perform an RMI service scan on common RMI ports",
        options: &[
            O::ScanHost,
            O::ScanPorts,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ScanTimeoutConnect,
            O::ScanTimeoutRead,
            O::Threads,
            O::NoProgress,
        ],
    },
    ActionEntry {
        action: Action::Serial,
        handler: "dispatch_serial",
        arguments: "<gadget> <command>",
        description: "Perform deserialization attacks against default RMI components",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::GadgetName,
            O::GadgetCmd,
            O::TargetBoundName,
            O::TargetObjid,
            O::TargetSignature,
            O::TargetComponent,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalPlugin,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::ConnFollow,
            O::Ssrf,
            O::SsrfGopher,
            O::SsrfResponse,
            O::SsrfEncode,
            O::SsrfRaw,
            O::SsrfStreamProtocol,
            O::ArgumentPos,
            O::Yso,
            O::ForceActivation,
            O::SerialVersionUid,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
        ],
    },
    ActionEntry {
        action: Action::Unbind,
        handler: "dispatch_unbind",
        arguments: "",
        description: "Removes the specified bound name from the registry",
        options: &[
            O::TargetHost,
            O::TargetPort,
            O::BindBoundName,
            O::GlobalConfig,
            O::GlobalNoColor,
            O::GlobalStackTrace,
            O::GlobalVerbose,
            O::ConnSsl,
            O::Ssrf,
            O::SsrfGopher,
            O::SsrfResponse,
            O::SsrfEncode,
            O::SsrfRaw,
            O::SsrfStreamProtocol,
            O::BindBypass,
            O::SocketFactory,
            O::SocketFactorySsl,
            O::SocketFactoryPlain,
        ],
    },
];
