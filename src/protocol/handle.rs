//! Raw remote handles as produced by the protocol runtime.
//!
//! The runtime integration hands back a `RemoteHandle` whose reference part is
//! a small closed union. Handle internals are crate-private; the only reader is
//! `remote::introspect`.

use super::endpoint::Endpoint;
use super::objid::{ObjId, Uid};

/// Kind name reported for transport-bound references
pub const UNICAST_REF_KIND: &str = "sun.rmi.server.UnicastRef";
/// Kind name reported for transport-bound references over custom socket factories
pub const UNICAST_REF2_KIND: &str = "sun.rmi.server.UnicastRef2";
/// Marker contained in the kind name of activation-bound references
pub const ACTIVATABLE_REF_MARKER: &str = "ActivatableRef";

/// Transport-level reference to a live exported object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRef {
    pub endpoint: Endpoint,
    pub obj_id: ObjId,
    /// Client socket factory class, `None` for the default factory
    pub csf: Option<String>,
    /// Server socket factory class, `None` for the default factory
    pub ssf: Option<String>,
}

impl LiveRef {
    pub fn new(endpoint: Endpoint, obj_id: ObjId) -> Self {
        Self {
            endpoint,
            obj_id,
            csf: None,
            ssf: None,
        }
    }

    pub fn with_socket_factories(mut self, csf: Option<String>, ssf: Option<String>) -> Self {
        self.csf = csf;
        self.ssf = ssf;
        self
    }
}

/// State carried by an activation-bound reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRef {
    /// Endpoint of the activator responsible for the object
    pub activator: Endpoint,
    pub activation_uid: Uid,
}

/// Reference object embedded in a remote handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawReference {
    Unicast(LiveRef),
    /// Any other reference implementation, identified by its kind name.
    /// Activatable references report their activation state here.
    Custom {
        kind: String,
        activation: Option<ActivationRef>,
    },
}

impl RawReference {
    pub fn activatable(activator: Endpoint, activation_uid: Uid) -> Self {
        RawReference::Custom {
            kind: format!("sun.rmi.server.{ACTIVATABLE_REF_MARKER}"),
            activation: Some(ActivationRef {
                activator,
                activation_uid,
            }),
        }
    }

    pub fn kind_name(&self) -> &str {
        match self {
            RawReference::Unicast(live_ref) if live_ref.csf.is_some() => UNICAST_REF2_KIND,
            RawReference::Unicast(_) => UNICAST_REF_KIND,
            RawReference::Custom { kind, .. } => kind,
        }
    }
}

/// Opaque handle for a remote object returned by lookup, bind or enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHandle {
    pub(crate) class_name: String,
    pub(crate) interfaces: Vec<String>,
    pub(crate) proxy: bool,
    pub(crate) reference: RawReference,
}

impl RemoteHandle {
    /// Handle backed by a generated stub class
    pub fn stub(class_name: impl Into<String>, reference: RawReference) -> Self {
        Self {
            class_name: class_name.into(),
            interfaces: Vec::new(),
            proxy: false,
            reference,
        }
    }

    /// Handle backed by a dynamic proxy implementing the given interfaces
    pub fn proxy(interfaces: Vec<String>, reference: RawReference) -> Self {
        Self {
            class_name: "jdk.proxy1.$Proxy0".to_string(),
            interfaces,
            proxy: true,
            reference,
        }
    }
}
