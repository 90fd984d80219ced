//! Single access point for the internals of a [`RemoteHandle`].
//!
//! Nothing else in the crate reads the handle's reference object or class
//! metadata; the classifier goes through these two functions.

use crate::constants::REMOTE_MARKER_INTERFACE;
use crate::error::{Result, RmgError};
use crate::protocol::{RawReference, RemoteHandle};

/// Reference object embedded in the handle
pub fn extract_ref(handle: &RemoteHandle) -> Result<&RawReference> {
    if let RawReference::Custom { kind, .. } = &handle.reference {
        if kind.trim().is_empty() {
            return Err(RmgError::introspection(
                "remote reference",
                "reference object reports an empty kind name",
            ));
        }
    }

    Ok(&handle.reference)
}

/// Interface implemented by the remote object.
///
/// Dynamic proxies report their first interface other than `java.rmi.Remote`;
/// stub based handles report the stub class.
pub fn interface_name(handle: &RemoteHandle) -> Result<String> {
    if handle.proxy {
        return handle
            .interfaces
            .iter()
            .find(|name| name.as_str() != REMOTE_MARKER_INTERFACE)
            .cloned()
            .ok_or_else(|| {
                RmgError::introspection(
                    "proxy interfaces",
                    format!("proxy {} implements no remote interface", handle.class_name),
                )
            });
    }

    if handle.class_name.is_empty() {
        return Err(RmgError::introspection(
            "stub class",
            "remote handle has no class name",
        ));
    }

    Ok(handle.class_name.clone())
}
