//! Hook registry behavior across slots and handler forms.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use payflow::prelude::*;

use crate::helpers::TestApp;

#[derive(Debug)]
struct Audit {
    seen: Arc<Mutex<Vec<String>>>,
}

impl HookHandler for Audit {
    fn handle(&self, payload: &HookPayload, gateway: &str) -> Option<HookPayload> {
        self.seen.lock().push(format!("{gateway}:{}", payload.kind()));
        None
    }

    fn contracts(&self) -> ContractSet {
        contracts![Contract::OBSERVER]
    }
}

#[test]
fn test_duplicate_registration_is_noop() {
    let app = TestApp::new();
    let hooks = app.context.hooks();
    let handler = Handler::invocable(|_, _| None);

    hooks
        .register(HookSlot::AfterSuccess, handler.clone(), Some(1), None)
        .expect("register");
    hooks
        .register(HookSlot::AfterSuccess, handler.clone(), Some(7), None)
        .expect("duplicate");

    let handlers = hooks.get_handlers(HookSlot::AfterSuccess).expect("handlers");
    assert_eq!(handlers.len(), 1);
    assert_eq!(handlers[0].priority, 1);
}

#[test]
fn test_single_handler_slot_replaces() {
    let app = TestApp::new();
    let hooks = app.context.hooks();
    hooks
        .configure_slot(HookSlot::BeforeProcess, SlotConfig::transform())
        .expect("configure");

    let first = Handler::invocable(|_, _| None);
    let second = Handler::invocable(|_, _| None);
    hooks
        .register(HookSlot::BeforeProcess, first.clone(), None, None)
        .expect("register");
    hooks
        .register(HookSlot::BeforeProcess, second.clone(), None, None)
        .expect("register");

    let handlers = hooks.get_handlers(HookSlot::BeforeProcess).expect("handlers");
    assert_eq!(handlers.len(), 1);
    assert!(handlers[0].handler.same_as(&second));
    assert_eq!(hooks.remove(HookSlot::BeforeProcess, &first), 0);
}

#[test]
fn test_get_handlers_on_empty_slot_fails() {
    let app = TestApp::new();
    let err = app
        .context
        .hooks()
        .get_handlers(HookSlot::AfterVerify)
        .expect_err("empty");
    assert!(err.is(ErrorKind::SlotEmpty));
}

#[test]
fn test_type_handler_requires_catalog_entry() {
    let app = TestApp::new();
    let hooks = app.context.hooks();

    let err = hooks
        .register(HookSlot::AfterSuccess, Handler::type_ref("audit"), None, None)
        .expect_err("unknown type");
    assert!(err.is(ErrorKind::Registration));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let shared = seen.clone();
    hooks
        .register_type("audit", contracts![Contract::OBSERVER], move || Audit {
            seen: shared.clone(),
        })
        .expect("register type");
    hooks
        .register(
            HookSlot::AfterSuccess,
            Handler::type_ref("audit"),
            None,
            Some(contracts![Contract::OBSERVER]),
        )
        .expect("register");

    app.register_stub("g1", PaymentResult::succeeded("tx"));
    app.coordinator.select_gateway("g1").expect("select");
    app.coordinator
        .pay_and_report(PaymentRequest::new(100, "USD"))
        .expect("pay");

    assert_eq!(*seen.lock(), vec!["g1:result".to_string()]);
}

#[test]
fn test_unmet_contracts_rejected() {
    let app = TestApp::new();
    let hooks = app.context.hooks();
    hooks
        .configure_slot(
            HookSlot::AfterVerify,
            SlotConfig::notification().with_required_contracts(contracts![Contract::TRANSFORM]),
        )
        .expect("configure");

    let err = hooks
        .register(
            HookSlot::AfterVerify,
            Handler::instance(Audit {
                seen: Arc::new(Mutex::new(Vec::new())),
            }),
            None,
            None,
        )
        .expect_err("observer is not a transform");
    assert!(err.is(ErrorKind::Registration));
    assert!(!hooks.has_handlers(HookSlot::AfterVerify));
}

#[test]
fn test_priority_order_across_forms() {
    let app = TestApp::new();
    let hooks = app.context.hooks();
    let order = Arc::new(Mutex::new(Vec::new()));

    for (tag, priority) in [("low", -5), ("first", 10), ("second", 10), ("zero", 0)] {
        let order = order.clone();
        hooks
            .register(
                HookSlot::AfterFailure,
                Handler::invocable(move |_, _| {
                    order.lock().push(tag);
                    None
                }),
                Some(priority),
                None,
            )
            .expect("register");
    }

    app.register_stub("g1", PaymentResult::failed("declined"));
    app.coordinator.select_gateway("g1").expect("select");
    app.coordinator
        .report_failure(&PaymentResult::failed("declined"))
        .expect("report");

    assert_eq!(*order.lock(), vec!["first", "second", "zero", "low"]);
}

#[test]
fn test_clear_keeps_catalog() {
    let app = TestApp::new();
    let hooks = app.context.hooks();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    hooks
        .register_type("audit", ContractSet::new(), || Audit {
            seen: Arc::new(Mutex::new(Vec::new())),
        })
        .expect("register type");
    hooks
        .register(
            HookSlot::AfterSuccess,
            Handler::invocable(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            }),
            None,
            None,
        )
        .expect("register");

    hooks.clear();

    assert_eq!(hooks.handler_count(HookSlot::AfterSuccess), 0);
    assert!(hooks.configured_slots().is_empty());
    assert!(hooks.has_type("audit"));
    hooks
        .execute(HookSlot::AfterSuccess, &HookPayload::Result(PaymentResult::succeeded("tx")), "g1")
        .expect("execute");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
