//! Gateway registry behavior through the public context.

use std::sync::atomic::Ordering;

use serde_json::json;

use payflow::prelude::*;

use crate::helpers::TestApp;

#[test]
fn test_factory_invoked_once_across_gets() {
    let app = TestApp::new();
    let (_, builds) = app.register_stub("g1", PaymentResult::succeeded("tx"));

    for _ in 0..5 {
        app.context.gateways().get("g1").expect("get");
    }
    app.coordinator.select_gateway("g1").expect("select");

    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reregistration_triggers_fresh_construction() {
    let app = TestApp::new();
    let (_, first_builds) = app.register_stub("g1", PaymentResult::succeeded("tx"));
    app.context.gateways().get("g1").expect("get");

    let (_, second_builds) = app.register_stub("g1", PaymentResult::succeeded("tx"));
    app.context.gateways().get("g1").expect("get");

    assert_eq!(first_builds.load(Ordering::SeqCst), 1);
    assert_eq!(second_builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unregister_lifecycle() {
    let app = TestApp::new();
    let gateways = app.context.gateways();

    let err = gateways.unregister("ghost").expect_err("unknown");
    assert!(err.is(ErrorKind::GatewayNotFound));

    app.register_stub("g1", PaymentResult::succeeded("tx"));
    gateways.unregister("g1").expect("unregister");

    assert!(!gateways.has("g1"));
    assert!(gateways.get("g1").expect_err("gone").is(ErrorKind::GatewayNotFound));
    assert!(
        app.coordinator
            .select_gateway("g1")
            .expect_err("gone")
            .is(ErrorKind::GatewayNotFound)
    );
}

#[test]
fn test_metadata_is_not_the_instance() {
    let app = TestApp::new();
    let mut metadata = Metadata::new();
    metadata.insert("label".to_string(), json!("Card payments"));

    app.context
        .gateways()
        .register(
            "cards",
            || Err(PayflowError::gateway("construction should not run")),
            metadata.clone(),
        )
        .expect("register");

    assert_eq!(
        app.context.gateways().get_metadata("cards").expect("metadata"),
        metadata
    );
    assert!(!app.context.gateways().is_instantiated("cards"));
}

#[test]
fn test_map_and_filter_enumerate_every_gateway() {
    let app = TestApp::new();
    let (_, a_builds) = app.register_stub("a", PaymentResult::succeeded("tx"));
    let (_, b_builds) = app.register_stub("b", PaymentResult::succeeded("tx"));

    let names = app
        .coordinator
        .map(|gateway| gateway.name().to_uppercase())
        .expect("map");
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(a_builds.load(Ordering::SeqCst), 1);
    assert_eq!(b_builds.load(Ordering::SeqCst), 1);

    let only_b = app
        .coordinator
        .filter(|gateway| gateway.name() == "b")
        .expect("filter");
    assert_eq!(only_b.len(), 1);
    assert_eq!(only_b[0].name(), "b");

    assert_eq!(
        app.context.gateways().all(false).expect("all"),
        vec!["a".to_string(), "b".to_string()]
    );
}
