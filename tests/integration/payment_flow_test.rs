//! End-to-end payment lifecycle scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use payflow::prelude::*;

use crate::helpers::TestApp;

#[derive(Debug)]
struct MarkerTransform;

impl HookHandler for MarkerTransform {
    fn handle(&self, payload: &HookPayload, gateway: &str) -> Option<HookPayload> {
        let request = payload.as_request()?.clone();
        Some(HookPayload::Request(
            request
                .with_field("marker", json!(true))
                .with_field("routed_to", json!(gateway)),
        ))
    }

    fn contracts(&self) -> ContractSet {
        contracts![Contract::TRANSFORM]
    }
}

#[test]
fn test_before_process_transform_reaches_gateway() {
    let app = TestApp::new();
    let stub_result = PaymentResult::succeeded("tx_stub").with_data("provider", json!("stub"));
    let (gateway, builds) = app.register_stub("g1", stub_result.clone());

    app.coordinator.select_gateway("g1").expect("select");
    app.context
        .hooks()
        .configure_slot(
            HookSlot::BeforeProcess,
            SlotConfig::transform().with_required_contracts(contracts![Contract::TRANSFORM]),
        )
        .expect("configure");
    app.context
        .hooks()
        .register(HookSlot::BeforeProcess, Handler::instance(MarkerTransform), None, None)
        .expect("register");

    let request = PaymentRequest::new(4200, "USD").with_description("order #7");
    let result = app.coordinator.pay(request.clone()).expect("pay");

    assert_eq!(result, stub_result);

    let received = gateway.received.lock();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].id, request.id);
    assert_eq!(received[0].amount, 4200);
    assert_eq!(received[0].field("marker"), Some(&json!(true)));
    assert_eq!(received[0].field("routed_to"), Some(&json!("g1")));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_pay_without_selection_fails() {
    let app = TestApp::new();
    let (gateway, builds) = app.register_stub("g1", PaymentResult::succeeded("tx"));

    let err = app
        .coordinator
        .pay(PaymentRequest::new(100, "USD"))
        .expect_err("no gateway selected");

    assert_eq!(err.kind, ErrorKind::NoGatewaySelected);
    assert!(gateway.received.lock().is_empty());
    assert_eq!(builds.load(Ordering::SeqCst), 0);
}

#[test]
fn test_report_failure_without_handlers_is_noop() {
    let app = TestApp::new();
    app.register_stub("g1", PaymentResult::failed("declined"));
    app.coordinator.select_gateway("g1").expect("select");

    assert!(!app.context.hooks().has_handlers(HookSlot::AfterFailure));
    let output = app
        .coordinator
        .report_failure(&PaymentResult::failed("declined"))
        .expect("empty slot is not an error");

    assert!(output.is_none());
}

#[test]
fn test_full_lifecycle_with_observers() {
    let app = TestApp::new();
    app.register_stub("g1", PaymentResult::failed("insufficient funds"));
    app.coordinator.select_gateway("g1").expect("select");

    let failures = Arc::new(AtomicUsize::new(0));
    let counter = failures.clone();
    let observer = Handler::invocable(move |payload, gateway| {
        assert_eq!(gateway, "g1");
        assert!(payload.as_result().is_some_and(PaymentResult::is_failure));
        counter.fetch_add(1, Ordering::SeqCst);
        None
    });
    app.context
        .hooks()
        .register(HookSlot::AfterFailure, observer.clone(), None, None)
        .expect("register");

    let result = app
        .coordinator
        .pay_and_report(PaymentRequest::new(100, "USD"))
        .expect("pay");
    assert!(result.is_failure());
    assert_eq!(failures.load(Ordering::SeqCst), 1);

    assert_eq!(app.context.hooks().remove(HookSlot::AfterFailure, &observer), 1);
    app.coordinator
        .report_failure(&result)
        .expect("report after removal");
    assert_eq!(failures.load(Ordering::SeqCst), 1);
}

#[test]
fn test_switching_gateways() {
    let app = TestApp::new();
    let (first, _) = app.register_stub("g1", PaymentResult::succeeded("tx_1"));
    let (second, _) = app.register_stub("g2", PaymentResult::succeeded("tx_2"));

    app.coordinator.select_gateway("g1").expect("select");
    app.coordinator.pay(PaymentRequest::new(100, "USD")).expect("pay");

    app.coordinator.select_gateway("g2").expect("select");
    let result = app.coordinator.pay(PaymentRequest::new(100, "USD")).expect("pay");

    assert_eq!(result.transaction_id.as_deref(), Some("tx_2"));
    assert_eq!(first.received.lock().len(), 1);
    assert_eq!(second.received.lock().len(), 1);

    app.coordinator.reset();
    let err = app
        .coordinator
        .report_success(&result)
        .expect_err("selection cleared");
    assert!(err.is(ErrorKind::NoGatewaySelected));
}
