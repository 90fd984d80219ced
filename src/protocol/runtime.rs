//! # Protocol Runtime Boundary
//!
//! The crate never speaks JRMP itself. Every network interaction goes through
//! an implementation of [`ProtocolRuntime`]: registry lookups and listings,
//! activation, method calls, and the prepared requests of actions whose
//! mechanics live outside this core (payload delivery, guessing, scanning).

use super::endpoint::Endpoint;
use super::handle::{LiveRef, RemoteHandle};
use super::objid::{ObjId, Uid};
use super::value::ResponseValue;
use crate::error::{Result, RmgError};
use crate::remote::UnicastObject;
use std::path::PathBuf;
use std::time::Duration;

/// SSRF output mode. When present, the runtime renders payloads instead of
/// contacting the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SsrfSettings {
    pub gopher: bool,
    pub encode: bool,
    pub raw: bool,
    pub stream_protocol: bool,
    /// Server response to evaluate instead of generating a payload
    pub response: Option<String>,
}

/// Everything the runtime needs to reach a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub endpoint: Endpoint,
    pub ssl: bool,
    pub follow: bool,
    pub socket_factory: Option<String>,
    pub socket_factory_ssl: bool,
    pub socket_factory_plain: bool,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub ssrf: Option<SsrfSettings>,
}

impl Connection {
    /// Plain connection with default timeouts
    pub fn plain(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ssl: false,
            follow: false,
            socket_factory: None,
            socket_factory_ssl: false,
            socket_factory_plain: false,
            connect_timeout: Duration::from_millis(crate::constants::DEFAULT_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(crate::constants::DEFAULT_READ_TIMEOUT_MS),
            ssrf: None,
        }
    }
}

/// Default RMI components reachable through well-known object ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmiComponent {
    Registry,
    Activator,
    Dgc,
}

impl RmiComponent {
    pub fn obj_id(&self) -> ObjId {
        match self {
            RmiComponent::Registry => ObjId::REGISTRY,
            RmiComponent::Activator => ObjId::ACTIVATOR,
            RmiComponent::Dgc => ObjId::DGC,
        }
    }

    pub fn from_short_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "reg" | "registry" => Some(RmiComponent::Registry),
            "act" | "activator" => Some(RmiComponent::Activator),
            "dgc" => Some(RmiComponent::Dgc),
            _ => None,
        }
    }
}

/// Remote object a payload or call is aimed at
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteTarget {
    Component(RmiComponent),
    BoundName(String),
    ObjId(ObjId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gadget {
    pub name: String,
    pub command: String,
    pub ysoserial: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRequest {
    pub connection: Connection,
    pub bound_name: String,
    pub listener: Endpoint,
    pub object: Option<String>,
    pub gadget_command: Option<String>,
    pub objid: Option<ObjId>,
    pub localhost_bypass: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayloadRequest {
    pub connection: Connection,
    pub target: RemoteTarget,
    pub signature: Option<String>,
    pub argument_position: Option<i64>,
    pub serial_version_uid: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JmxForward {
    pub endpoint: Endpoint,
    pub bound_name: Option<String>,
    pub objid: Option<ObjId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessSettings {
    pub wordlist_file: Option<PathBuf>,
    pub wordlist_folder: Option<PathBuf>,
    pub signature: Option<String>,
    pub zero_arg: bool,
    pub duplicates: bool,
    pub force_guessing: bool,
    pub trusted: bool,
    pub update_wordlists: bool,
    pub create_samples: bool,
    pub sample_folder: Option<PathBuf>,
    pub template_folder: Option<PathBuf>,
    pub threads: usize,
    pub progress: bool,
}

/// Fully prepared request for an action whose mechanics live in the runtime
#[derive(Debug, Clone)]
pub enum DelegatedAction {
    Bind(BindRequest),
    Rebind(BindRequest),
    Unbind {
        connection: Connection,
        bound_name: String,
        localhost_bypass: bool,
    },
    Serial {
        request: PayloadRequest,
        gadget: Gadget,
    },
    Codebase {
        request: PayloadRequest,
        class_name: String,
        url: String,
        payload_serial_version_uid: Option<i64>,
    },
    Listen {
        address: Endpoint,
        gadget: Gadget,
    },
    RogueJmx {
        address: Endpoint,
        objid: Option<ObjId>,
        forward: Option<JmxForward>,
        ssl: bool,
    },
    Scan {
        host: String,
        ports: Vec<u16>,
        connect_timeout: Duration,
        read_timeout: Duration,
        threads: usize,
        progress: bool,
    },
    Guess {
        connection: Connection,
        targets: Vec<UnicastObject>,
        settings: GuessSettings,
    },
}

impl DelegatedAction {
    pub fn name(&self) -> &'static str {
        match self {
            DelegatedAction::Bind(_) => "bind",
            DelegatedAction::Rebind(_) => "rebind",
            DelegatedAction::Unbind { .. } => "unbind",
            DelegatedAction::Serial { .. } => "serial",
            DelegatedAction::Codebase { .. } => "codebase",
            DelegatedAction::Listen { .. } => "listen",
            DelegatedAction::RogueJmx { .. } => "roguejmx",
            DelegatedAction::Scan { .. } => "scan",
            DelegatedAction::Guess { .. } => "guess",
        }
    }
}

/// Integration point for the RMI protocol implementation.
///
/// Activation may be called concurrently from several worker threads.
pub trait ProtocolRuntime: Send + Sync {
    /// Resolve a bound name in the registry at `connection`
    fn lookup(&self, connection: &Connection, bound_name: &str) -> Result<RemoteHandle>;

    /// List all bound names of the registry at `connection`
    fn list(&self, connection: &Connection) -> Result<Vec<String>>;

    /// Ask the activator at `activator` for a live handle of the object
    fn activate(&self, activator: &Endpoint, activation_uid: &Uid) -> Result<RemoteHandle>;

    /// Invoke `signature` on the object behind `target`
    fn call(
        &self,
        connection: &Connection,
        target: &LiveRef,
        signature: &str,
        arguments: &str,
    ) -> Result<Option<ResponseValue>>;

    /// Execute a prepared request, returning report lines for the user
    fn delegate(&self, action: &DelegatedAction) -> Result<Vec<String>> {
        Err(RmgError::unsupported(action.name()))
    }
}

/// Runtime without network capabilities. Offline actions work with it; every
/// remote operation fails with `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRuntime;

impl ProtocolRuntime for OfflineRuntime {
    fn lookup(&self, _connection: &Connection, _bound_name: &str) -> Result<RemoteHandle> {
        Err(RmgError::unsupported("lookup"))
    }

    fn list(&self, _connection: &Connection) -> Result<Vec<String>> {
        Err(RmgError::unsupported("list"))
    }

    fn activate(&self, _activator: &Endpoint, _activation_uid: &Uid) -> Result<RemoteHandle> {
        Err(RmgError::unsupported("activate"))
    }

    fn call(
        &self,
        _connection: &Connection,
        _target: &LiveRef,
        _signature: &str,
        _arguments: &str,
    ) -> Result<Option<ResponseValue>> {
        Err(RmgError::unsupported("call"))
    }
}
