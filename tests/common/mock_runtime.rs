//! In-memory protocol runtime that records every interaction.

use parking_lot::Mutex;
use rmg_core::protocol::{
    Connection, DelegatedAction, Endpoint, LiveRef, ProtocolRuntime, RemoteHandle, ResponseValue,
    Uid,
};
use rmg_core::{Result, RmgError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub target: LiveRef,
    pub signature: String,
    pub arguments: String,
}

#[derive(Debug, Default)]
pub struct MockRuntime {
    bindings: Vec<(String, RemoteHandle)>,
    activations: HashMap<Uid, RemoteHandle>,
    response: Option<ResponseValue>,
    activation_count: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
    delegated: Mutex<Vec<DelegatedAction>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(mut self, bound_name: &str, handle: RemoteHandle) -> Self {
        self.bindings.push((bound_name.to_string(), handle));
        self
    }

    /// Handle returned when the object with `uid` is activated
    pub fn with_activation(mut self, uid: Uid, handle: RemoteHandle) -> Self {
        self.activations.insert(uid, handle);
        self
    }

    pub fn with_response(mut self, response: ResponseValue) -> Self {
        self.response = Some(response);
        self
    }

    pub fn activation_count(&self) -> usize {
        self.activation_count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn delegated(&self) -> Vec<DelegatedAction> {
        self.delegated.lock().clone()
    }
}

impl ProtocolRuntime for MockRuntime {
    fn lookup(&self, _connection: &Connection, bound_name: &str) -> Result<RemoteHandle> {
        self.bindings
            .iter()
            .find(|(name, _)| name == bound_name)
            .map(|(_, handle)| handle.clone())
            .ok_or_else(|| RmgError::runtime("lookup", format!("{bound_name} is not bound")))
    }

    fn list(&self, _connection: &Connection) -> Result<Vec<String>> {
        Ok(self.bindings.iter().map(|(name, _)| name.clone()).collect())
    }

    fn activate(&self, _activator: &Endpoint, activation_uid: &Uid) -> Result<RemoteHandle> {
        self.activation_count.fetch_add(1, Ordering::SeqCst);
        self.activations
            .get(activation_uid)
            .cloned()
            .ok_or_else(|| RmgError::runtime("activate", format!("unknown activation id {activation_uid}")))
    }

    fn call(
        &self,
        _connection: &Connection,
        target: &LiveRef,
        signature: &str,
        arguments: &str,
    ) -> Result<Option<ResponseValue>> {
        self.calls.lock().push(RecordedCall {
            target: target.clone(),
            signature: signature.to_string(),
            arguments: arguments.to_string(),
        });
        Ok(self.response.clone())
    }

    fn delegate(&self, action: &DelegatedAction) -> Result<Vec<String>> {
        self.delegated.lock().push(action.clone());
        Ok(vec![format!("{} handled by mock runtime", action.name())])
    }
}
