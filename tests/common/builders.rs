//! Builders for remote handles and dispatchers used across integration tests.

use rmg_core::config::RmgConfig;
use rmg_core::constants::{REMOTE_MARKER_INTERFACE, SPRING_REMOTING_INTERFACE};
use rmg_core::endpoints::KnownEndpointCatalog;
use rmg_core::operations::{Action, Dispatcher};
use rmg_core::options::{OptionValue, OptionValues, RmgOption};
use rmg_core::output::{Printer, SharedBuffer};
use rmg_core::protocol::{Endpoint, LiveRef, ObjId, ProtocolRuntime, RawReference, RemoteHandle, Uid};
use std::sync::Arc;

pub const TARGET_HOST: &str = "10.0.0.5";
pub const TARGET_PORT: u16 = 1099;

pub fn space() -> Uid {
    Uid {
        unique: 0x6d4e_2b1a,
        time: 1_700_000_000_000,
        count: -0x7ffe,
    }
}

pub fn objid(obj_num: i64) -> ObjId {
    ObjId {
        obj_num,
        space: space(),
    }
}

pub fn live_ref(port: u16, obj_num: i64) -> LiveRef {
    LiveRef::new(Endpoint::new(TARGET_HOST, port), objid(obj_num))
}

/// Dynamic proxy implementing `interface` plus the remote marker
pub fn unicast_handle(interface: &str, port: u16, obj_num: i64) -> RemoteHandle {
    RemoteHandle::proxy(
        vec![REMOTE_MARKER_INTERFACE.to_string(), interface.to_string()],
        RawReference::Unicast(live_ref(port, obj_num)),
    )
}

pub fn spring_handle(port: u16, obj_num: i64) -> RemoteHandle {
    unicast_handle(SPRING_REMOTING_INTERFACE, port, obj_num)
}

pub fn activation_uid(seed: i32) -> Uid {
    Uid {
        unique: seed,
        time: 1_700_000_000_000,
        count: 1,
    }
}

/// Stub handle whose reference needs activation through the activator on 1098
pub fn activatable_handle(stub_class: &str, seed: i32) -> RemoteHandle {
    RemoteHandle::stub(
        stub_class,
        RawReference::activatable(Endpoint::new(TARGET_HOST, 1098), activation_uid(seed)),
    )
}

/// Handle with a reference kind the classifier does not know
pub fn foreign_handle(kind: &str) -> RemoteHandle {
    RemoteHandle::stub(
        "eu.example.TunnelServer_Stub",
        RawReference::Custom {
            kind: kind.to_string(),
            activation: None,
        },
    )
}

pub fn catalog() -> KnownEndpointCatalog {
    KnownEndpointCatalog::builtin().expect("builtin catalog parses")
}

/// Values carrying the standard target host and port
pub fn target_values() -> OptionValues {
    OptionValues::new()
        .with(RmgOption::TargetHost, OptionValue::Text(TARGET_HOST.into()))
        .with(RmgOption::TargetPort, OptionValue::Integer(i64::from(TARGET_PORT)))
}

pub fn text(value: &str) -> OptionValue {
    OptionValue::Text(value.to_string())
}

pub fn flag() -> OptionValue {
    OptionValue::Flag(true)
}

/// Dispatcher writing its report into a buffer
pub fn dispatcher<R>(action: Action, values: OptionValues, runtime: Arc<R>) -> (Dispatcher, SharedBuffer)
where
    R: ProtocolRuntime + 'static,
{
    let (printer, buffer) = Printer::buffered();
    let dispatcher = Dispatcher::new(
        action,
        values,
        RmgConfig::default(),
        runtime,
        Arc::new(catalog()),
    )
    .with_printer(printer);
    (dispatcher, buffer)
}
