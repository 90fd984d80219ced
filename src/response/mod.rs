//! # Response Visitor
//!
//! Recursively renders values returned by remote method calls. Containers are
//! walked element by element, remote references are classified and their
//! protocol details printed, bytes are rendered as hex without separators so
//! byte sequences read as one hex string.

use crate::constants::MAP_RELATION_MARKER;
use crate::endpoints::KnownEndpointCatalog;
use crate::error::Result;
use crate::output::Printer;
use crate::protocol::{RemoteHandle, ResponseValue};
use crate::remote::{classify, RemoteObject};
use std::path::Path;
use tracing::warn;

pub struct ResponseVisitor<'a> {
    printer: &'a mut Printer,
    catalog: &'a KnownEndpointCatalog,
}

impl<'a> ResponseVisitor<'a> {
    pub fn new(printer: &'a mut Printer, catalog: &'a KnownEndpointCatalog) -> Self {
        Self { printer, catalog }
    }

    pub fn visit(&mut self, value: &ResponseValue) -> Result<()> {
        match value {
            ResponseValue::Collection(items) => {
                for item in items {
                    self.visit(item)?;
                }
            }
            ResponseValue::Map(entries) => {
                for (key, value) in entries {
                    self.visit(key)?;
                    self.printer.plain(MAP_RELATION_MARKER)?;
                    self.visit(value)?;
                }
            }
            ResponseValue::Array(array) => {
                for item in array.boxed() {
                    self.visit(&item)?;
                }
            }
            ResponseValue::Remote(handle) => self.visit_remote(handle)?,
            ResponseValue::File(path) => self.visit_file(path)?,
            ResponseValue::Byte(byte) => self.printer.plain(&format!("{byte:02x}"))?,
            other => self.printer.line(&other.to_string())?,
        }

        Ok(())
    }

    fn visit_remote(&mut self, handle: &RemoteHandle) -> Result<()> {
        match classify(handle.clone(), None, self.catalog)? {
            RemoteObject::Unicast(object) | RemoteObject::SpringRemoting(object) => {
                self.printer.line("Printing unicast RemoteObject:")?;
                self.printer.indent();
                let result = (|| -> Result<()> {
                    self.printer.mixed("Remote Class:\t\t", object.interface_name())?;
                    self.printer.mixed("Endpoint:\t\t", &object.target())?;
                    self.printer.mixed("ObjID:\t\t\t", &object.obj_id().to_string())?;
                    self.printer
                        .mixed("ClientSocketFactory:\t", object.csf().unwrap_or("default"))?;
                    self.printer
                        .mixed("ServerSocketFactory:\t", object.ssf().unwrap_or("default"))?;
                    Ok(())
                })();
                self.printer.dedent();
                result
            }
            RemoteObject::Activatable(object) => {
                self.printer.line("Printing activatable RemoteObject:")?;
                self.printer.indent();
                let result = (|| -> Result<()> {
                    self.printer.mixed("Remote Class:\t\t", object.interface_name())?;
                    self.printer.mixed("Activator:\t\t", &object.activator_endpoint())?;
                    self.printer
                        .mixed("ActivationID:\t\t", &object.activation_uid().to_string())?;
                    Ok(())
                })();
                self.printer.dedent();
                result
            }
            other => {
                warn!(kind = other.kind(), "Unsupported remote object in response");
                self.printer.warn("Unsupported object type.")?;
                Ok(())
            }
        }
    }

    fn visit_file(&mut self, path: &Path) -> Result<()> {
        let absolute = std::path::absolute(path)?;
        self.printer.line(&absolute.display().to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ArrayValue, Endpoint, LiveRef, ObjId, RawReference, Uid};

    fn render(value: &ResponseValue) -> String {
        let (mut printer, buffer) = Printer::buffered();
        let catalog = KnownEndpointCatalog::builtin().unwrap();
        ResponseVisitor::new(&mut printer, &catalog)
            .visit(value)
            .unwrap();
        buffer.contents()
    }

    #[test]
    fn test_bytes_are_concatenated_hex() {
        let value = ResponseValue::Array(ArrayValue::Bytes(vec![0xca, 0xfe, 0x00, 0x0a]));
        assert_eq!(render(&value), "cafe000a");
    }

    #[test]
    fn test_map_prints_relation_marker() {
        let value = ResponseValue::Map(vec![(
            ResponseValue::Str("key".into()),
            ResponseValue::Int(7),
        )]);
        assert_eq!(render(&value), "key\n  --> 7\n");
    }

    #[test]
    fn test_collections_visit_every_element() {
        let value = ResponseValue::Collection(vec![
            ResponseValue::Str("first".into()),
            ResponseValue::Collection(vec![ResponseValue::Bool(true)]),
            ResponseValue::Object {
                class_name: "java.util.Date".into(),
                repr: "Thu Jan 01 00:00:00 UTC 1970".into(),
            },
        ]);
        assert_eq!(
            render(&value),
            "first\ntrue\nThu Jan 01 00:00:00 UTC 1970\n"
        );
    }

    #[test]
    fn test_absolute_file_path() {
        let cwd = std::env::current_dir().unwrap();
        let rendered = render(&ResponseValue::File("loot/secret.txt".into()));
        assert_eq!(
            rendered,
            format!("{}\n", cwd.join("loot/secret.txt").display())
        );
    }

    #[test]
    fn test_unicast_remote_details() {
        let live_ref = LiveRef::new(
            Endpoint::new("10.0.0.5", 41235),
            ObjId {
                obj_num: 5,
                space: Uid {
                    unique: 1,
                    time: 2,
                    count: 3,
                },
            },
        )
        .with_socket_factories(Some("javax.rmi.ssl.SslRMIClientSocketFactory".into()), None);
        let handle = RemoteHandle::proxy(
            vec!["eu.example.IPlainServer".into()],
            RawReference::Unicast(live_ref),
        );

        let rendered = render(&ResponseValue::Remote(handle));
        assert_eq!(
            rendered,
            "Printing unicast RemoteObject:\n\
             \x20   Remote Class:\t\teu.example.IPlainServer\n\
             \x20   Endpoint:\t\t10.0.0.5:41235\n\
             \x20   ObjID:\t\t\t[1:2:3, 5]\n\
             \x20   ClientSocketFactory:\tjavax.rmi.ssl.SslRMIClientSocketFactory\n\
             \x20   ServerSocketFactory:\tdefault\n"
        );
    }

    #[test]
    fn test_activatable_remote_details() {
        let handle = RemoteHandle::stub(
            "eu.example.ActivationServer_Stub",
            RawReference::activatable(Endpoint::new("10.0.0.5", 1098), Uid::default()),
        );

        let rendered = render(&ResponseValue::Remote(handle));
        assert!(rendered.starts_with("Printing activatable RemoteObject:\n"));
        assert!(rendered.contains("Activator:\t\t10.0.0.5:1098\n"));
        assert!(rendered.contains("ActivationID:\t\t0:0:0\n"));
    }

    #[test]
    fn test_unknown_reference_kind_propagates() {
        let (mut printer, _buffer) = Printer::buffered();
        let catalog = KnownEndpointCatalog::default();
        let handle = RemoteHandle::stub(
            "eu.example.Stub",
            RawReference::Custom {
                kind: "eu.example.TunnelRef".into(),
                activation: None,
            },
        );

        let result = ResponseVisitor::new(&mut printer, &catalog).visit(&ResponseValue::Remote(handle));
        assert!(result.is_err());
        assert_eq!(printer.level(), 0);
    }
}
