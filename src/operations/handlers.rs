//! Action handlers.
//!
//! `enum`, `call`, `known` and `objid` are implemented here on top of the
//! classifier and the activation lifecycle. The remaining actions validate
//! and assemble their parameters into a [`DelegatedAction`] and hand it to
//! the protocol runtime, printing whatever report lines it returns.

use super::dispatcher::Dispatcher;
use crate::endpoints::KnownEndpoint;
use crate::error::{Result, RmgError};
use crate::options::RmgOption;
use crate::output::Printer;
use crate::protocol::{
    BindRequest, Connection, DelegatedAction, Endpoint, GuessSettings, JmxForward, LiveRef, ObjId,
    PayloadRequest, RawReference, RemoteHandle, RemoteTarget,
};
use crate::remote::{classify, RemoteObject, UnicastObject};
use crate::response::ResponseVisitor;
use chrono::SecondsFormat;
use std::io;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Scan actions understood by `enum`
const ENUM_SCAN_ACTIONS: &[&str] = &[
    "list",
    "string-marshalling",
    "codebase",
    "localhost-bypass",
    "security-manager",
    "jep290",
    "filter-bypass",
    "activator",
];

/// Stub class used when a target is addressed by ObjID only
const ANONYMOUS_STUB_CLASS: &str = "java.rmi.server.RemoteStub";

impl Dispatcher {
    #[instrument(skip_all)]
    pub(crate) fn dispatch_enum(&self) -> Result<()> {
        let connection = self.connection()?;
        let scan_actions = self.values().text_list(RmgOption::EnumAction);

        if let Some(unknown) = scan_actions
            .iter()
            .find(|name| !ENUM_SCAN_ACTIONS.contains(&name.as_str()))
        {
            return Err(RmgError::InvalidOptionValue {
                option: RmgOption::EnumAction,
                value: unknown.clone(),
                reason: format!("expected one of {}", ENUM_SCAN_ACTIONS.join(", ")),
            });
        }

        let list = scan_actions.is_empty() || scan_actions.iter().any(|name| name == "list");
        if list {
            let bound_names = self.bound_names(&connection)?;
            let objects = self.lookup_all(&connection, &bound_names)?;
            self.print(|p| print_bound_names(p, &bound_names, &objects))?;

            if self.values().flag(RmgOption::Activation)
                || self.values().flag(RmgOption::ForceActivation)
            {
                self.print_activations(&objects)?;
            }
        }

        let checks: Vec<&str> = scan_actions
            .iter()
            .map(String::as_str)
            .filter(|name| *name != "list")
            .collect();
        if !checks.is_empty() {
            info!(checks = ?checks, "Skipping vulnerability checks");
            self.print(|p| {
                p.warn(&format!(
                    "Vulnerability checks ({}) need payload support from the protocol runtime and were skipped.",
                    checks.join(", ")
                ))
            })?;
        }

        Ok(())
    }

    #[instrument(skip_all)]
    pub(crate) fn dispatch_call(&self) -> Result<()> {
        let connection = self.connection()?;
        let signature = self.require_text(RmgOption::TargetSignature)?;
        let arguments = self.values().text(RmgOption::CallArguments).unwrap_or_default();

        let live_ref = match self.remote_target()? {
            RemoteTarget::BoundName(bound_name) => {
                let handle = self.runtime().lookup(&connection, &bound_name)?;
                classify(handle, Some(bound_name), self.catalog())?
                    .into_unicast(self.runtime(), self.catalog())?
                    .live_ref()
                    .clone()
            }
            RemoteTarget::ObjId(objid) => LiveRef::new(connection.endpoint.clone(), objid),
            RemoteTarget::Component(component) => {
                LiveRef::new(connection.endpoint.clone(), component.obj_id())
            }
        };

        debug!(endpoint = %live_ref.endpoint, objid = %live_ref.obj_id, signature, "Calling remote method");
        let response = self
            .runtime()
            .call(&connection, &live_ref, signature, arguments)?;

        match response {
            Some(value) if self.values().flag(RmgOption::GenericPrint) => {
                self.with_printer_mut(|p| ResponseVisitor::new(p, self.catalog()).visit(&value))
            }
            Some(_) => self.print(|p| p.line("Method call returned a value (use --show-response to print it).")),
            None => self.print(|p| p.line("Method call returned no value.")),
        }
    }

    #[instrument(skip_all)]
    pub(crate) fn dispatch_guess(&self) -> Result<()> {
        let connection = self.connection()?;
        let mut objects = self.guess_objects(&connection)?;

        let force = self.values().flag(RmgOption::GuessForceGuessing);
        if !force {
            let mut skipped = Vec::new();
            objects.retain(|object| match object.known_endpoint() {
                Some(endpoint) => {
                    skipped.push((object.bound_name().unwrap_or("-").to_string(), endpoint.name.clone()));
                    false
                }
                None => true,
            });

            self.print(|p| {
                for (bound_name, endpoint) in &skipped {
                    p.line(&format!(
                        "Skipping bound name {bound_name}: known endpoint {endpoint} (use --force-guessing)"
                    ))?;
                }
                Ok(())
            })?;
        }

        if objects.is_empty() {
            return self.print(|p| p.warn("No remote objects left to guess."));
        }

        let threads = self.threads()?;
        let targets: Vec<UnicastObject> =
            RemoteObject::into_unicast_all_parallel(objects, self.runtime(), self.catalog(), threads)?;

        let config = &self.config().guess;
        let values = self.values();
        let settings = GuessSettings {
            wordlist_file: values.path(RmgOption::GuessWordlistFile).map(|p| p.to_path_buf()),
            wordlist_folder: values
                .path(RmgOption::GuessWordlistFolder)
                .map(|p| p.to_path_buf())
                .or_else(|| config.wordlist_folder.clone()),
            signature: self.optional_text(RmgOption::TargetSignature),
            zero_arg: values.flag(RmgOption::GuessZeroArg) || config.zero_arg,
            duplicates: values.flag(RmgOption::GuessDuplicates) || config.duplicates,
            force_guessing: force,
            trusted: values.flag(RmgOption::GuessTrusted),
            update_wordlists: values.flag(RmgOption::GuessUpdate),
            create_samples: values.flag(RmgOption::GuessCreateSamples),
            sample_folder: values.path(RmgOption::GuessSampleFolder).map(|p| p.to_path_buf()),
            template_folder: values
                .path(RmgOption::GuessTemplateFolder)
                .map(|p| p.to_path_buf())
                .or_else(|| config.template_folder.clone()),
            threads,
            progress: self.progress(),
        };

        self.delegate(DelegatedAction::Guess {
            connection,
            targets,
            settings,
        })
    }

    pub(crate) fn dispatch_known(&self) -> Result<()> {
        let class_name = self.require_text(RmgOption::KnownClass)?;

        match self.catalog().lookup(class_name) {
            Some(endpoint) => self.print(|p| print_known_endpoint(p, &endpoint)),
            None => self.print(|p| {
                p.warn(&format!("The specified class name {class_name} isn't a known class."))
            }),
        }
    }

    pub(crate) fn dispatch_objid(&self) -> Result<()> {
        let objid = self
            .optional_objid(RmgOption::ObjidObjid)?
            .ok_or(RmgError::MissingOption {
                option: RmgOption::ObjidObjid,
                action: self.action(),
            })?;

        self.print(|p| print_objid(p, &objid))
    }

    pub(crate) fn dispatch_bind(&self) -> Result<()> {
        let request = self.bind_request()?;
        self.delegate(DelegatedAction::Bind(request))
    }

    pub(crate) fn dispatch_rebind(&self) -> Result<()> {
        let request = self.bind_request()?;
        self.delegate(DelegatedAction::Rebind(request))
    }

    pub(crate) fn dispatch_unbind(&self) -> Result<()> {
        let connection = self.connection()?;
        let bound_name = self.require_text(RmgOption::BindBoundName)?.to_string();

        self.delegate(DelegatedAction::Unbind {
            connection,
            bound_name,
            localhost_bypass: self.values().flag(RmgOption::BindBypass),
        })
    }

    pub(crate) fn dispatch_serial(&self) -> Result<()> {
        let request = self.payload_request()?;
        let gadget = self.gadget(RmgOption::GadgetName, RmgOption::GadgetCmd)?;
        self.delegate(DelegatedAction::Serial { request, gadget })
    }

    pub(crate) fn dispatch_codebase(&self) -> Result<()> {
        let request = self.payload_request()?;
        let class_name = self.require_text(RmgOption::CodebaseClass)?.to_string();
        let url = self.require_text(RmgOption::CodebaseUrl)?.to_string();

        self.delegate(DelegatedAction::Codebase {
            request,
            class_name,
            url,
            payload_serial_version_uid: self.values().integer(RmgOption::PayloadSerialVersionUid),
        })
    }

    pub(crate) fn dispatch_listen(&self) -> Result<()> {
        let address = self.listener(RmgOption::ListenIp, RmgOption::ListenPort)?;
        let gadget = self.gadget(RmgOption::GadgetName, RmgOption::GadgetCmd)?;
        self.delegate(DelegatedAction::Listen { address, gadget })
    }

    pub(crate) fn dispatch_rogue_jmx(&self) -> Result<()> {
        let address = self.listener(RmgOption::ListenIp, RmgOption::ListenPort)?;

        let forward = match self.values().text(RmgOption::RoguejmxForwardHost) {
            Some(host) => Some(JmxForward {
                endpoint: Endpoint::new(host, self.require_port(RmgOption::RoguejmxForwardPort)?),
                bound_name: self.optional_text(RmgOption::RoguejmxForwardBoundName),
                objid: self.optional_objid(RmgOption::RoguejmxForwardObjid)?,
            }),
            None => None,
        };

        self.delegate(DelegatedAction::RogueJmx {
            address,
            objid: self.optional_objid(RmgOption::RoguejmxObjid)?,
            forward,
            ssl: self.values().flag(RmgOption::ConnSsl),
        })
    }

    pub(crate) fn dispatch_port_scan(&self) -> Result<()> {
        let host = self.require_text(RmgOption::ScanHost)?.to_string();
        let scan = &self.config().scan;

        let requested = self.values().integer_list(RmgOption::ScanPorts);
        let ports = if requested.is_empty() {
            scan.ports.clone()
        } else {
            requested
                .iter()
                .map(|raw| {
                    u16::try_from(*raw)
                        .ok()
                        .filter(|port| *port != 0)
                        .ok_or_else(|| RmgError::InvalidOptionValue {
                            option: RmgOption::ScanPorts,
                            value: raw.to_string(),
                            reason: "expected a port between 1 and 65535".to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?
        };

        self.delegate(DelegatedAction::Scan {
            host,
            ports,
            connect_timeout: self.timeout(RmgOption::ScanTimeoutConnect, scan.connect_timeout_ms)?,
            read_timeout: self.timeout(RmgOption::ScanTimeoutRead, scan.read_timeout_ms)?,
            threads: self.threads()?,
            progress: self.progress(),
        })
    }

    fn delegate(&self, action: DelegatedAction) -> Result<()> {
        debug!(action = action.name(), "Delegating to protocol runtime");
        let report = self.runtime().delegate(&action)?;
        self.print(|p| report.iter().try_for_each(|line| p.line(line)))
    }

    /// The `--bound-name` target, or every name bound in the registry
    fn bound_names(&self, connection: &Connection) -> Result<Vec<String>> {
        match self.values().text(RmgOption::TargetBoundName) {
            Some(bound_name) => Ok(vec![bound_name.to_string()]),
            None => self.runtime().list(connection),
        }
    }

    fn lookup_all(&self, connection: &Connection, bound_names: &[String]) -> Result<Vec<RemoteObject>> {
        bound_names
            .iter()
            .map(|bound_name| {
                let handle = self.runtime().lookup(connection, bound_name)?;
                classify(handle, Some(bound_name.clone()), self.catalog())
            })
            .collect()
    }

    fn guess_objects(&self, connection: &Connection) -> Result<Vec<RemoteObject>> {
        let objid = match self.remote_target() {
            Ok(RemoteTarget::ObjId(objid)) => objid,
            Ok(RemoteTarget::Component(component)) => component.obj_id(),
            Ok(RemoteTarget::BoundName(_)) | Err(RmgError::MissingOption { .. }) => {
                let bound_names = self.bound_names(connection)?;
                return self.lookup_all(connection, &bound_names);
            }
            Err(err) => return Err(err),
        };

        let handle = RemoteHandle::stub(
            ANONYMOUS_STUB_CLASS,
            RawReference::Unicast(LiveRef::new(connection.endpoint.clone(), objid)),
        );
        Ok(vec![classify(handle, None, self.catalog())?])
    }

    fn print_activations(&self, objects: &[RemoteObject]) -> Result<()> {
        let activatable: Vec<_> = objects
            .iter()
            .filter_map(|object| match object {
                RemoteObject::Activatable(object) => Some(object),
                _ => None,
            })
            .collect();

        if activatable.is_empty() {
            return Ok(());
        }

        let mut activated = Vec::with_capacity(activatable.len());
        for object in activatable {
            activated.push(object.activate(self.runtime(), self.catalog())?);
        }

        self.print(|p| {
            p.newline()?;
            p.line("Activated objects:")?;
            p.indent();
            for object in &activated {
                p.line(&format!("- {}", object.bound_name().unwrap_or("-")))?;
                p.indent();
                p.mixed("Endpoint: ", &object.target())?;
                p.mixed("ObjID: ", &object.obj_id().to_string())?;
                p.dedent();
            }
            p.dedent();
            Ok(())
        })
    }

    fn bind_request(&self) -> Result<BindRequest> {
        let connection = self.connection()?;
        let raw_listener = self.require_text(RmgOption::BindAddress)?;
        let listener = raw_listener
            .parse::<Endpoint>()
            .map_err(|reason| RmgError::InvalidOptionValue {
                option: RmgOption::BindAddress,
                value: raw_listener.to_string(),
                reason,
            })?;

        Ok(BindRequest {
            connection,
            bound_name: self.require_text(RmgOption::BindBoundName)?.to_string(),
            listener,
            object: self.optional_text(RmgOption::BindGadgetName),
            gadget_command: self.optional_text(RmgOption::BindGadgetCmd),
            objid: self.optional_objid(RmgOption::BindObjid)?,
            localhost_bypass: self.values().flag(RmgOption::BindBypass),
        })
    }

    /// Payload target; non-component targets also need a method signature
    fn payload_request(&self) -> Result<PayloadRequest> {
        let connection = self.connection()?;
        let target = self.remote_target()?;
        let signature = self.optional_text(RmgOption::TargetSignature);

        if signature.is_none() && !matches!(target, RemoteTarget::Component(_)) {
            return Err(RmgError::MissingOption {
                option: RmgOption::TargetSignature,
                action: self.action(),
            });
        }

        Ok(PayloadRequest {
            connection,
            target,
            signature,
            argument_position: self.values().integer(RmgOption::ArgumentPos),
            serial_version_uid: self.values().integer(RmgOption::SerialVersionUid),
        })
    }
}

fn known_label(endpoint: Option<&Arc<KnownEndpoint>>) -> String {
    match endpoint {
        Some(endpoint) => format!("known class: {}", endpoint.name),
        None => "unknown class".to_string(),
    }
}

fn print_bound_names(p: &mut Printer, bound_names: &[String], objects: &[RemoteObject]) -> io::Result<()> {
    p.line("RMI registry bound names:")?;
    p.indent();

    if bound_names.is_empty() {
        p.line("- No objects are bound to the registry.")?;
    }

    for placeholder in RemoteObject::from_bound_names(bound_names.iter().cloned()) {
        let bound_name = placeholder.bound_name().unwrap_or_default();
        p.line(&format!("- {bound_name}"))?;

        let object = RemoteObject::get_by_name(bound_name, objects).unwrap_or(&placeholder);
        p.indent();
        print_object(p, object)?;
        p.dedent();
    }

    p.dedent();
    Ok(())
}

fn print_object(p: &mut Printer, object: &RemoteObject) -> io::Result<()> {
    match object {
        RemoteObject::Unicast(unicast) | RemoteObject::SpringRemoting(unicast) => {
            p.line(&format!(
                "--> {} ({})",
                unicast.interface_name(),
                known_label(unicast.known_endpoint())
            ))?;
            p.indent();
            if matches!(object, RemoteObject::SpringRemoting(_)) {
                p.line("Spring Remoting Interface")?;
            }
            p.mixed("Endpoint: ", &unicast.target())?;
            if let Some(csf) = unicast.csf() {
                p.mixed("CSF: ", csf)?;
            }
            if let Some(ssf) = unicast.ssf() {
                p.mixed("SSF: ", ssf)?;
            }
            p.mixed("ObjID: ", &unicast.obj_id().to_string())?;
            p.dedent();
        }
        RemoteObject::Activatable(activatable) => {
            p.line(&format!(
                "--> {} ({})",
                activatable.interface_name(),
                known_label(activatable.known_endpoint())
            ))?;
            p.indent();
            p.mixed("Activator: ", &activatable.activator_endpoint())?;
            p.mixed("ActivationID: ", &activatable.activation_uid().to_string())?;
            p.dedent();
        }
        RemoteObject::Empty(_) => p.warn("Object was not resolved.")?,
    }
    Ok(())
}

fn print_list(p: &mut Printer, heading: &str, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    p.line(heading)?;
    p.indent();
    for item in items {
        p.line(&format!("- {item}"))?;
    }
    p.dedent();
    p.newline()
}

fn print_known_endpoint(p: &mut Printer, endpoint: &KnownEndpoint) -> io::Result<()> {
    p.line("Name:")?;
    p.indent();
    p.line(&endpoint.name)?;
    p.dedent();
    p.newline()?;

    print_list(p, "Class Name:", &endpoint.class_names)?;

    p.line("Description:")?;
    p.indent();
    p.line(&endpoint.description)?;
    p.dedent();
    p.newline()?;

    print_list(p, "Remote Methods:", &endpoint.remote_methods)?;
    print_list(p, "References:", &endpoint.references)?;

    if !endpoint.vulnerabilities.is_empty() {
        p.line("Vulnerabilities:")?;
        p.indent();
        for vulnerability in &endpoint.vulnerabilities {
            p.line(&format!("- {}", vulnerability.name))?;
            p.indent();
            p.line(&vulnerability.description)?;
            for reference in &vulnerability.references {
                p.mixed("Reference: ", reference)?;
            }
            p.dedent();
        }
        p.dedent();
    }

    Ok(())
}

fn well_known_name(objid: &ObjId) -> Option<&'static str> {
    match *objid {
        ObjId::REGISTRY => Some("RMI Registry"),
        ObjId::ACTIVATOR => Some("RMI Activator"),
        ObjId::DGC => Some("Distributed Garbage Collector"),
        _ => None,
    }
}

fn print_objid(p: &mut Printer, objid: &ObjId) -> io::Result<()> {
    let created = objid
        .space
        .created_at()
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "out of range".to_string());

    p.line(&format!("Details for ObjID {objid}"))?;
    p.newline()?;
    p.mixed("ObjNum: \t\t", &objid.obj_num.to_string())?;
    p.line("UID:")?;
    p.indent();
    p.mixed("Unique: \t", &objid.space.unique.to_string())?;
    p.mixed("Time: \t\t", &format!("{} ({created})", objid.space.time))?;
    p.mixed("Count: \t\t", &objid.space.count.to_string())?;
    p.dedent();

    if let Some(name) = well_known_name(objid) {
        p.newline()?;
        p.mixed("Well-known object: ", name)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RmgConfig;
    use crate::endpoints::KnownEndpointCatalog;
    use crate::operations::Action;
    use crate::options::{OptionValue, OptionValues};
    use crate::output::SharedBuffer;
    use crate::protocol::OfflineRuntime;

    fn offline(action: Action, values: OptionValues) -> (Dispatcher, SharedBuffer) {
        let (printer, buffer) = Printer::buffered();
        let dispatcher = Dispatcher::new(
            action,
            values,
            RmgConfig::default(),
            Arc::new(OfflineRuntime),
            Arc::new(KnownEndpointCatalog::builtin().unwrap()),
        )
        .with_printer(printer);
        (dispatcher, buffer)
    }

    #[test]
    fn test_objid_prints_decoded_fields() {
        let values = OptionValues::new().with(
            RmgOption::ObjidObjid,
            OptionValue::Text("[6d4e2b1a:18bcfe56800:-7ffe, 42]".into()),
        );
        let (dispatcher, buffer) = offline(Action::Objid, values);

        dispatcher.dispatch_objid().unwrap();
        let output = buffer.contents();

        assert!(output.starts_with("Details for ObjID [6d4e2b1a:18bcfe56800:-7ffe, 42]\n"));
        assert!(output.contains("ObjNum: \t\t42\n"));
        assert!(output.contains("Count: \t\t-32766\n"));
        assert!(output.contains("(2023-11-14T22:13:20.000Z)"));
        assert!(!output.contains("Well-known object"));
    }

    #[test]
    fn test_objid_names_well_known_objects() {
        let values = OptionValues::new().with(RmgOption::ObjidObjid, OptionValue::Text("0".into()));
        let (dispatcher, buffer) = offline(Action::Objid, values);

        dispatcher.dispatch_objid().unwrap();
        assert!(buffer.contents().contains("Well-known object: RMI Registry\n"));
    }

    #[test]
    fn test_known_miss_is_not_an_error() {
        let values = OptionValues::new()
            .with(RmgOption::KnownClass, OptionValue::Text("eu.example.Nothing".into()));
        let (dispatcher, buffer) = offline(Action::Known, values);

        dispatcher.dispatch_known().unwrap();
        assert_eq!(
            buffer.contents(),
            "[-] The specified class name eu.example.Nothing isn't a known class.\n"
        );
    }

    #[test]
    fn test_known_hit_prints_catalog_entry() {
        let values = OptionValues::new().with(
            RmgOption::KnownClass,
            OptionValue::Text("sun.rmi.registry.RegistryImpl_Stub".into()),
        );
        let (dispatcher, buffer) = offline(Action::Known, values);

        dispatcher.dispatch_known().unwrap();
        let output = buffer.contents();
        assert!(output.starts_with("Name:\n    RMI Registry\n"));
        assert!(output.contains("    - sun.rmi.registry.RegistryImpl_Stub\n"));
    }

    #[test]
    fn test_delegated_actions_fail_offline() {
        let values = OptionValues::new()
            .with(RmgOption::ListenIp, OptionValue::Text("0.0.0.0".into()))
            .with(RmgOption::ListenPort, OptionValue::Integer(4444))
            .with(RmgOption::GadgetName, OptionValue::Text("CommonsCollections6".into()))
            .with(RmgOption::GadgetCmd, OptionValue::Text("id".into()));
        let (dispatcher, _buffer) = offline(Action::Listen, values);

        assert!(matches!(
            dispatcher.dispatch_listen(),
            Err(RmgError::Unsupported { operation }) if operation == "listen"
        ));
    }

    #[test]
    fn test_serial_needs_signature_for_bound_names() {
        let values = OptionValues::new()
            .with(RmgOption::TargetHost, OptionValue::Text("10.0.0.5".into()))
            .with(RmgOption::TargetPort, OptionValue::Integer(1099))
            .with(RmgOption::TargetBoundName, OptionValue::Text("plain-server".into()))
            .with(RmgOption::GadgetName, OptionValue::Text("CommonsCollections6".into()))
            .with(RmgOption::GadgetCmd, OptionValue::Text("id".into()));
        let (dispatcher, _buffer) = offline(Action::Serial, values);

        assert!(matches!(
            dispatcher.dispatch_serial(),
            Err(RmgError::MissingOption { option: RmgOption::TargetSignature, action: Action::Serial })
        ));
    }

    #[test]
    fn test_enum_rejects_unknown_scan_action() {
        let values = OptionValues::new()
            .with(RmgOption::TargetHost, OptionValue::Text("10.0.0.5".into()))
            .with(RmgOption::TargetPort, OptionValue::Integer(1099))
            .with(RmgOption::EnumAction, OptionValue::TextList(vec!["portscan".into()]));
        let (dispatcher, _buffer) = offline(Action::Enum, values);

        assert!(matches!(
            dispatcher.dispatch_enum(),
            Err(RmgError::InvalidOptionValue { option: RmgOption::EnumAction, .. })
        ));
    }
}
