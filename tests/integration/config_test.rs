//! Configuration-driven context setup.

use serde_json::json;

use payflow::prelude::*;

use crate::helpers::TestApp;

const CONFIG: &str = r#"
[logging]
level = "debug"
format = "json"

[gateways]
default = "cards"

[hooks.before_process]
allow_multiple = false
return_policy = "single"
required_contracts = ["transform"]

[hooks.after_success]
default_priority = 5
"#;

#[derive(Debug)]
struct Tagger;

impl HookHandler for Tagger {
    fn handle(&self, payload: &HookPayload, _gateway: &str) -> Option<HookPayload> {
        let request = payload.as_request()?.clone();
        Some(HookPayload::Request(request.with_field("tagged", json!(true))))
    }

    fn contracts(&self) -> ContractSet {
        contracts![Contract::TRANSFORM]
    }
}

#[test]
fn test_config_sections_parsed() {
    let config = PayflowConfig::from_toml_str(CONFIG).expect("parse");

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.gateways.default.as_deref(), Some("cards"));
    assert_eq!(config.hooks.len(), 2);
}

#[test]
fn test_configured_slots_applied_to_registry() {
    let app = TestApp::from_toml(CONFIG);
    let hooks = app.context.hooks();

    let before = hooks.slot_config(HookSlot::BeforeProcess);
    assert!(!before.allow_multiple);
    assert!(before.returns_first());
    assert_eq!(
        before.required_contracts,
        Some(contracts![Contract::TRANSFORM])
    );

    assert_eq!(hooks.slot_config(HookSlot::AfterSuccess).default_priority, 5);
    assert_eq!(
        hooks.configured_slots(),
        vec![HookSlot::BeforeProcess, HookSlot::AfterSuccess]
    );
}

#[test]
fn test_configured_contracts_enforced_on_registration() {
    let app = TestApp::from_toml(CONFIG);

    let err = app
        .context
        .hooks()
        .register(
            HookSlot::BeforeProcess,
            Handler::invocable(|_, _| None),
            None,
            None,
        )
        .expect_err("function cannot carry contracts");
    assert!(err.is(ErrorKind::Registration));

    app.context
        .hooks()
        .register(HookSlot::BeforeProcess, Handler::instance(Tagger), None, None)
        .expect("contract-bearing instance");
}

#[test]
fn test_default_gateway_selected_from_config() {
    let app = TestApp::from_toml(CONFIG);
    let (gateway, _) = app.register_stub("cards", PaymentResult::succeeded("tx_cards"));
    app.context
        .hooks()
        .register(HookSlot::BeforeProcess, Handler::instance(Tagger), None, None)
        .expect("register");

    assert!(app.coordinator.select_default().expect("select default"));
    assert_eq!(app.coordinator.selected_gateway_name().as_deref(), Some("cards"));

    app.coordinator
        .pay(PaymentRequest::new(250, "EUR"))
        .expect("pay");
    assert_eq!(gateway.received.lock()[0].field("tagged"), Some(&json!(true)));
}

#[test]
fn test_invalid_return_policy_rejected() {
    let config = PayflowConfig::from_toml_str(
        r#"
        [hooks.after_verify]
        return_policy = "first"
        "#,
    )
    .expect("parse");

    let err = PaymentContext::from_config(&config).expect_err("unknown policy");
    assert!(err.is(ErrorKind::InvalidConfig));
}
