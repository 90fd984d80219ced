//! Typed wrappers around classified remote handles.

use crate::endpoints::KnownEndpoint;
use crate::protocol::{ActivationRef, Endpoint, LiveRef, ObjId, RemoteHandle, Uid};
use std::sync::Arc;

/// Metadata shared by every resolved remote object. Computed once by the
/// classifier and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    bound_name: Option<String>,
    handle: RemoteHandle,
    interface_name: String,
    known_endpoint: Option<Arc<KnownEndpoint>>,
}

impl ObjectInfo {
    pub(crate) fn new(
        bound_name: Option<String>,
        handle: RemoteHandle,
        interface_name: String,
        known_endpoint: Option<Arc<KnownEndpoint>>,
    ) -> Self {
        Self {
            bound_name,
            handle,
            interface_name,
            known_endpoint,
        }
    }
}

/// Remote object reachable through a live transport endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct UnicastObject {
    info: ObjectInfo,
    live_ref: LiveRef,
    spring_remoting: bool,
}

impl UnicastObject {
    pub(crate) fn new(info: ObjectInfo, live_ref: LiveRef, spring_remoting: bool) -> Self {
        Self {
            info,
            live_ref,
            spring_remoting,
        }
    }

    /// Exported through Spring's `RmiInvocationHandler`
    pub fn is_spring_remoting(&self) -> bool {
        self.spring_remoting
    }

    pub fn bound_name(&self) -> Option<&str> {
        self.info.bound_name.as_deref()
    }

    pub fn handle(&self) -> &RemoteHandle {
        &self.info.handle
    }

    pub fn interface_name(&self) -> &str {
        &self.info.interface_name
    }

    pub fn known_endpoint(&self) -> Option<&Arc<KnownEndpoint>> {
        self.info.known_endpoint.as_ref()
    }

    pub fn is_known(&self) -> bool {
        self.info.known_endpoint.is_some()
    }

    pub fn live_ref(&self) -> &LiveRef {
        &self.live_ref
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.live_ref.endpoint
    }

    pub fn obj_id(&self) -> &ObjId {
        &self.live_ref.obj_id
    }

    /// Client socket factory class, `None` for the default factory
    pub fn csf(&self) -> Option<&str> {
        self.live_ref.csf.as_deref()
    }

    /// Server socket factory class, `None` for the default factory
    pub fn ssf(&self) -> Option<&str> {
        self.live_ref.ssf.as_deref()
    }

    /// `host:port` of the exported object
    pub fn target(&self) -> String {
        self.live_ref.endpoint.to_string()
    }
}

impl From<UnicastObject> for RemoteObject {
    fn from(object: UnicastObject) -> Self {
        if object.is_spring_remoting() {
            RemoteObject::SpringRemoting(object)
        } else {
            RemoteObject::Unicast(object)
        }
    }
}

/// Remote object that has to be activated before it can be called
#[derive(Debug, Clone, PartialEq)]
pub struct ActivatableObject {
    info: ObjectInfo,
    activation: ActivationRef,
}

impl ActivatableObject {
    pub(crate) fn new(info: ObjectInfo, activation: ActivationRef) -> Self {
        Self { info, activation }
    }

    pub fn bound_name(&self) -> Option<&str> {
        self.info.bound_name.as_deref()
    }

    pub fn handle(&self) -> &RemoteHandle {
        &self.info.handle
    }

    pub fn interface_name(&self) -> &str {
        &self.info.interface_name
    }

    pub fn known_endpoint(&self) -> Option<&Arc<KnownEndpoint>> {
        self.info.known_endpoint.as_ref()
    }

    pub fn activator(&self) -> &Endpoint {
        &self.activation.activator
    }

    pub fn activation_uid(&self) -> &Uid {
        &self.activation.activation_uid
    }

    /// `host:port` of the activator
    pub fn activator_endpoint(&self) -> String {
        self.activation.activator.to_string()
    }
}

/// Bound name without a resolved handle. Only good for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyObject {
    bound_name: String,
}

impl EmptyObject {
    pub fn new(bound_name: impl Into<String>) -> Self {
        Self {
            bound_name: bound_name.into(),
        }
    }

    pub fn bound_name(&self) -> &str {
        &self.bound_name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteObject {
    Unicast(UnicastObject),
    /// Unicast object exported through Spring's `RmiInvocationHandler`
    SpringRemoting(UnicastObject),
    Activatable(ActivatableObject),
    Empty(EmptyObject),
}

impl RemoteObject {
    pub fn bound_name(&self) -> Option<&str> {
        match self {
            RemoteObject::Unicast(o) | RemoteObject::SpringRemoting(o) => o.bound_name(),
            RemoteObject::Activatable(o) => o.bound_name(),
            RemoteObject::Empty(o) => Some(o.bound_name()),
        }
    }

    pub fn interface_name(&self) -> Option<&str> {
        match self {
            RemoteObject::Unicast(o) | RemoteObject::SpringRemoting(o) => Some(o.interface_name()),
            RemoteObject::Activatable(o) => Some(o.interface_name()),
            RemoteObject::Empty(_) => None,
        }
    }

    pub fn known_endpoint(&self) -> Option<&Arc<KnownEndpoint>> {
        match self {
            RemoteObject::Unicast(o) | RemoteObject::SpringRemoting(o) => o.known_endpoint(),
            RemoteObject::Activatable(o) => o.known_endpoint(),
            RemoteObject::Empty(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.known_endpoint().is_some()
    }

    pub fn handle(&self) -> Option<&RemoteHandle> {
        match self {
            RemoteObject::Unicast(o) | RemoteObject::SpringRemoting(o) => Some(o.handle()),
            RemoteObject::Activatable(o) => Some(o.handle()),
            RemoteObject::Empty(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RemoteObject::Unicast(_) => "unicast",
            RemoteObject::SpringRemoting(_) => "spring-remoting",
            RemoteObject::Activatable(_) => "activatable",
            RemoteObject::Empty(_) => "empty",
        }
    }

    /// Empty objects for display before resolution, in input order
    pub fn from_bound_names<I, S>(bound_names: I) -> Vec<RemoteObject>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        bound_names
            .into_iter()
            .map(|name| RemoteObject::Empty(EmptyObject::new(name)))
            .collect()
    }

    /// First object whose bound name equals `bound_name`
    pub fn get_by_name<'a>(bound_name: &str, objects: &'a [RemoteObject]) -> Option<&'a RemoteObject> {
        objects
            .iter()
            .find(|object| object.bound_name() == Some(bound_name))
    }
}
