//! # Remote Reference Classification
//!
//! Turns a raw [`RemoteHandle`] into exactly one [`RemoteObject`] variant.
//!
//! ```text
//! RemoteHandle ──▶ extract_ref ──┬─ Unicast ──┬─ Spring handler iface ──▶ SpringRemoting
//!              ──▶ interface     │            └─ otherwise            ──▶ Unicast
//!                                ├─ *ActivatableRef*                  ──▶ Activatable
//!                                └─ anything else                     ──▶ UnexpectedReferenceType
//! ```

use super::introspect;
use super::object::{ActivatableObject, ObjectInfo, RemoteObject, UnicastObject};
use crate::constants::SPRING_REMOTING_INTERFACE;
use crate::endpoints::KnownEndpointCatalog;
use crate::error::{Result, RmgError};
use crate::protocol::{RawReference, RemoteHandle, ACTIVATABLE_REF_MARKER};
use tracing::debug;

/// Classify `handle`, optionally associating it with the bound name it was
/// obtained from.
pub fn classify(
    handle: RemoteHandle,
    bound_name: Option<String>,
    catalog: &KnownEndpointCatalog,
) -> Result<RemoteObject> {
    let reference = introspect::extract_ref(&handle)?.clone();
    let interface_name = introspect::interface_name(&handle)?;
    let known_endpoint = catalog.lookup(&interface_name);

    debug!(
        bound_name = bound_name.as_deref(),
        interface = %interface_name,
        reference_kind = %reference.kind_name(),
        known = known_endpoint.is_some(),
        "Classifying remote handle"
    );

    match reference {
        RawReference::Unicast(live_ref) => {
            let spring = interface_name == SPRING_REMOTING_INTERFACE;
            let info = ObjectInfo::new(bound_name, handle, interface_name, known_endpoint);
            Ok(UnicastObject::new(info, live_ref, spring).into())
        }
        RawReference::Custom { kind, activation } if kind.contains(ACTIVATABLE_REF_MARKER) => {
            let activation = activation.ok_or_else(|| {
                RmgError::introspection(
                    "activatable reference",
                    format!("{kind} carries no activation identifier"),
                )
            })?;
            let info = ObjectInfo::new(bound_name, handle, interface_name, known_endpoint);
            Ok(RemoteObject::Activatable(ActivatableObject::new(info, activation)))
        }
        RawReference::Custom { kind, .. } => Err(RmgError::UnexpectedReferenceType { kind }),
    }
}
