mod common;

use common::*;
use rmg_core::remote::{classify, EmptyObject, RemoteObject};
use rmg_core::RmgError;

fn mixed_batch(runtime_catalog: &rmg_core::KnownEndpointCatalog) -> Vec<RemoteObject> {
    vec![
        classify(unicast_handle("eu.example.IPlainServer", 41235, 1), Some("plain".into()), runtime_catalog).unwrap(),
        classify(spring_handle(41236, 2), Some("spring".into()), runtime_catalog).unwrap(),
        classify(
            activatable_handle("eu.example.ActivationServer_Stub", 3),
            Some("activation-test".into()),
            runtime_catalog,
        )
        .unwrap(),
    ]
}

fn activating_runtime() -> MockRuntime {
    MockRuntime::new().with_activation(
        activation_uid(3),
        unicast_handle("eu.example.IActivationService", 41240, 3),
    )
}

#[test]
fn test_batch_activates_exactly_once() {
    let catalog = catalog();
    let runtime = activating_runtime();

    let unicast = RemoteObject::into_unicast_all(mixed_batch(&catalog), &runtime, &catalog).unwrap();

    assert_eq!(unicast.len(), 3);
    assert_eq!(runtime.activation_count(), 1);

    let names: Vec<_> = unicast.iter().filter_map(|object| object.bound_name()).collect();
    assert_eq!(names, vec!["plain", "spring", "activation-test"]);
    assert_eq!(unicast[2].target(), "10.0.0.5:41240");
    assert_eq!(unicast[2].interface_name(), "eu.example.IActivationService");
}

#[test]
fn test_parallel_batch_keeps_order() {
    let catalog = catalog();
    let runtime = activating_runtime();

    let unicast =
        RemoteObject::into_unicast_all_parallel(mixed_batch(&catalog), &runtime, &catalog, 4).unwrap();

    assert_eq!(runtime.activation_count(), 1);
    let targets: Vec<_> = unicast.iter().map(|object| object.target()).collect();
    assert_eq!(
        targets,
        vec!["10.0.0.5:41235", "10.0.0.5:41236", "10.0.0.5:41240"]
    );
}

#[test]
fn test_unicast_normalization_is_idempotent() {
    let catalog = catalog();
    let runtime = MockRuntime::new();

    let original = classify(spring_handle(41236, 2), Some("spring".into()), &catalog).unwrap();
    let once = original.clone().into_unicast(&runtime, &catalog).unwrap();
    assert!(once.is_spring_remoting());

    let renormalized = RemoteObject::from(once.clone());
    assert_eq!(renormalized, original);
    assert_eq!(renormalized.kind(), "spring-remoting");

    let twice = renormalized.into_unicast(&runtime, &catalog).unwrap();
    assert!(twice.is_spring_remoting());
    assert_eq!(once, twice);
    assert_eq!(twice.obj_id(), &objid(2));
    assert_eq!(twice.target(), "10.0.0.5:41236");
    assert_eq!(original.handle(), Some(once.handle()));
    assert_eq!(runtime.activation_count(), 0);
}

#[test]
fn test_plain_unicast_stays_plain() {
    let catalog = catalog();
    let runtime = MockRuntime::new();

    let original = classify(unicast_handle("eu.example.IPlainServer", 41235, 1), None, &catalog).unwrap();
    let once = original.clone().into_unicast(&runtime, &catalog).unwrap();

    assert!(!once.is_spring_remoting());
    assert_eq!(RemoteObject::from(once), original);
}

#[test]
fn test_activation_keeps_spring_kind() {
    let catalog = catalog();
    let runtime = MockRuntime::new().with_activation(activation_uid(5), spring_handle(41250, 5));

    let object = classify(
        activatable_handle("eu.example.SpringActivation_Stub", 5),
        Some("spring-activation".into()),
        &catalog,
    )
    .unwrap();
    let unicast = object.into_unicast(&runtime, &catalog).unwrap();

    assert!(unicast.is_spring_remoting());
    assert_eq!(RemoteObject::from(unicast).kind(), "spring-remoting");
    assert_eq!(runtime.activation_count(), 1);
}

#[test]
fn test_empty_object_cannot_be_normalized() {
    let catalog = catalog();
    let runtime = MockRuntime::new();

    let result = RemoteObject::Empty(EmptyObject::new("ghost")).into_unicast(&runtime, &catalog);

    match result {
        Err(RmgError::EmptyObjectDereference { bound_name }) => assert_eq!(bound_name, "ghost"),
        other => panic!("expected empty object dereference, got {other:?}"),
    }
}

#[test]
fn test_failed_activation_aborts_batch() {
    let catalog = catalog();
    let runtime = MockRuntime::new();

    let result = RemoteObject::into_unicast_all(mixed_batch(&catalog), &runtime, &catalog);

    assert!(matches!(result, Err(RmgError::Runtime { .. })));
    assert_eq!(runtime.activation_count(), 1);
}

#[test]
fn test_parallel_batch_reports_lowest_failing_index() {
    let catalog = catalog();
    let runtime = MockRuntime::new();

    let objects = vec![
        classify(unicast_handle("eu.example.IPlainServer", 41235, 1), Some("plain".into()), &catalog).unwrap(),
        RemoteObject::Empty(EmptyObject::new("first-failure")),
        RemoteObject::Empty(EmptyObject::new("second-failure")),
    ];

    match RemoteObject::into_unicast_all_parallel(objects, &runtime, &catalog, 3) {
        Err(RmgError::EmptyObjectDereference { bound_name }) => assert_eq!(bound_name, "first-failure"),
        other => panic!("expected empty object dereference, got {other:?}"),
    }
}
