//! # Activation Lifecycle
//!
//! Normalizes any [`RemoteObject`] into a callable [`UnicastObject`].
//! Unicast objects pass through untouched; activatable objects are activated
//! through the protocol runtime and the resulting handle is classified again.

use super::classifier::classify;
use super::object::{ActivatableObject, RemoteObject, UnicastObject};
use crate::endpoints::KnownEndpointCatalog;
use crate::error::{Result, RmgError};
use crate::protocol::ProtocolRuntime;
use crossbeam::channel;
use tracing::{debug, error, instrument};

impl ActivatableObject {
    /// Activate the object. `self` is left untouched; the returned object is
    /// independently owned.
    #[instrument(skip_all, fields(bound_name = self.bound_name(), activator = %self.activator()))]
    pub fn activate(
        &self,
        runtime: &dyn ProtocolRuntime,
        catalog: &KnownEndpointCatalog,
    ) -> Result<UnicastObject> {
        let handle = runtime.activate(self.activator(), self.activation_uid())?;
        let bound_name = self.bound_name().map(str::to_string);

        match classify(handle, bound_name, catalog)? {
            RemoteObject::Unicast(object) | RemoteObject::SpringRemoting(object) => {
                debug!(endpoint = %object.target(), "Activation returned live reference");
                Ok(object)
            }
            other => Err(RmgError::introspection(
                "activation result",
                format!("activator returned a {} reference", other.kind()),
            )),
        }
    }
}

impl RemoteObject {
    /// Unicast form of this object, activating it when necessary. Spring
    /// remoting objects come back with [`UnicastObject::is_spring_remoting`] set.
    pub fn into_unicast(
        self,
        runtime: &dyn ProtocolRuntime,
        catalog: &KnownEndpointCatalog,
    ) -> Result<UnicastObject> {
        match self {
            RemoteObject::Unicast(object) | RemoteObject::SpringRemoting(object) => Ok(object),
            RemoteObject::Activatable(object) => object.activate(runtime, catalog),
            RemoteObject::Empty(object) => Err(RmgError::EmptyObjectDereference {
                bound_name: object.bound_name().to_string(),
            }),
        }
    }

    /// Element-wise [`RemoteObject::into_unicast`]. Index order is preserved and
    /// the first failure aborts the batch.
    pub fn into_unicast_all(
        objects: Vec<RemoteObject>,
        runtime: &dyn ProtocolRuntime,
        catalog: &KnownEndpointCatalog,
    ) -> Result<Vec<UnicastObject>> {
        objects
            .into_iter()
            .map(|object| object.into_unicast(runtime, catalog))
            .collect()
    }

    /// Like [`RemoteObject::into_unicast_all`], but activations run on up to
    /// `threads` workers. Every failure is logged; the error of the lowest
    /// failing index is returned and no partial result is produced.
    pub fn into_unicast_all_parallel(
        objects: Vec<RemoteObject>,
        runtime: &dyn ProtocolRuntime,
        catalog: &KnownEndpointCatalog,
        threads: usize,
    ) -> Result<Vec<UnicastObject>> {
        let total = objects.len();
        let workers = threads.clamp(1, total.max(1));

        let (job_tx, job_rx) = channel::unbounded::<(usize, RemoteObject)>();
        let (result_tx, result_rx) = channel::unbounded::<(usize, Result<UnicastObject>)>();

        for job in objects.into_iter().enumerate() {
            job_tx
                .send(job)
                .map_err(|e| RmgError::runtime("activation queue", e.to_string()))?;
        }
        drop(job_tx);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for (index, object) in job_rx.iter() {
                        let result = object.into_unicast(runtime, catalog);
                        if result_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut slots: Vec<Option<UnicastObject>> = (0..total).map(|_| None).collect();
        let mut failures: Vec<(usize, RmgError)> = Vec::new();

        for (index, result) in result_rx.iter() {
            match result {
                Ok(object) => slots[index] = Some(object),
                Err(err) => {
                    error!(index, error = %err, "Activation failed");
                    failures.push((index, err));
                }
            }
        }

        if let Some((_, first)) = failures.into_iter().min_by_key(|(index, _)| *index) {
            return Err(first);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    RmgError::introspection("activation batch", format!("no result for index {index}"))
                })
            })
            .collect()
    }
}
