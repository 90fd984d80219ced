//! # Protocol Model
//!
//! Data the protocol runtime exchanges with this core: endpoints, object ids,
//! raw remote handles, decoded call responses and the runtime trait itself.

pub mod endpoint;
pub mod handle;
pub mod objid;
pub mod runtime;
pub mod value;

pub use endpoint::Endpoint;
pub use handle::{
    ActivationRef, LiveRef, RawReference, RemoteHandle, ACTIVATABLE_REF_MARKER, UNICAST_REF2_KIND,
    UNICAST_REF_KIND,
};
pub use objid::{ObjId, Uid};
pub use runtime::{
    BindRequest, Connection, DelegatedAction, Gadget, GuessSettings, JmxForward, OfflineRuntime,
    PayloadRequest, ProtocolRuntime, RemoteTarget, RmiComponent, SsrfSettings,
};
pub use value::{ArrayValue, ResponseValue};
