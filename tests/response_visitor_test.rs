mod common;

use common::*;
use rmg_core::output::Printer;
use rmg_core::protocol::{ArrayValue, RawReference, RemoteHandle, ResponseValue};
use rmg_core::response::ResponseVisitor;

fn render(value: &ResponseValue) -> String {
    let (mut printer, buffer) = Printer::buffered();
    let catalog = catalog();
    ResponseVisitor::new(&mut printer, &catalog).visit(value).unwrap();
    assert_eq!(printer.level(), 0);
    buffer.contents()
}

#[test]
fn test_string_to_bytes_map() {
    let value = ResponseValue::Map(vec![
        (
            ResponseValue::Str("a".into()),
            ResponseValue::Array(ArrayValue::Bytes(vec![0x0a, 0xff])),
        ),
        (
            ResponseValue::Str("b".into()),
            ResponseValue::Array(ArrayValue::Bytes(vec![0x00])),
        ),
    ]);

    assert_eq!(render(&value), "a\n  --> 0affb\n  --> 00");
}

#[test]
fn test_primitive_arrays_are_boxed() {
    let value = ResponseValue::Array(ArrayValue::Ints(vec![1, -2, 3]));
    assert_eq!(render(&value), "1\n-2\n3\n");
}

#[test]
fn test_nested_collections() {
    let value = ResponseValue::Collection(vec![
        ResponseValue::Collection(vec![ResponseValue::Long(1), ResponseValue::Null]),
        ResponseValue::Str("done".into()),
    ]);

    let rendered = render(&value);
    assert!(rendered.starts_with("1\n"));
    assert!(rendered.ends_with("done\n"));
    assert_eq!(rendered.lines().count(), 3);
}

#[test]
fn test_remote_objects_inside_collections() {
    let value = ResponseValue::Collection(vec![
        ResponseValue::Remote(unicast_handle("eu.example.IPlainServer", 41235, 7)),
        ResponseValue::Remote(RemoteHandle::stub(
            "sun.rmi.registry.RegistryImpl_Stub",
            RawReference::Unicast(live_ref(1099, 0)),
        )),
    ]);

    let rendered = render(&value);
    assert_eq!(rendered.matches("Printing unicast RemoteObject:\n").count(), 2);
    assert!(rendered.contains("    Remote Class:\t\teu.example.IPlainServer\n"));
    assert!(rendered.contains("    Remote Class:\t\tsun.rmi.registry.RegistryImpl_Stub\n"));
    assert!(rendered.contains("    ObjID:\t\t\t[6d4e2b1a:18bcfe56800:-7ffe, 7]\n"));
}
