//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use payflow::prelude::*;

/// Stub gateway that records what it receives and answers with a fixed result.
#[derive(Debug)]
pub struct StubGateway {
    /// Gateway name.
    pub name: String,
    /// Result returned from every `pay` call.
    pub result: PaymentResult,
    /// Requests received, in call order.
    pub received: Mutex<Vec<PaymentRequest>>,
}

impl StubGateway {
    /// Creates a stub answering every payment with `result`.
    pub fn new(name: &str, result: PaymentResult) -> Self {
        Self {
            name: name.to_string(),
            result,
            received: Mutex::new(Vec::new()),
        }
    }
}

impl Gateway for StubGateway {
    fn name(&self) -> &str {
        &self.name
    }

    fn pay(&self, request: &PaymentRequest) -> PayflowResult<PaymentResult> {
        self.received.lock().push(request.clone());
        Ok(self.result.clone())
    }
}

/// Test application context
pub struct TestApp {
    /// Registries under test
    pub context: PaymentContext,
    /// Coordinator bound to `context`
    pub coordinator: PaymentCoordinator,
}

impl TestApp {
    /// Create a new test application with empty registries
    pub fn new() -> Self {
        let context = PaymentContext::new();
        let coordinator = context.coordinator();
        Self {
            context,
            coordinator,
        }
    }

    /// Create a test application from an inline TOML configuration
    pub fn from_toml(source: &str) -> Self {
        let config = PayflowConfig::from_toml_str(source).expect("Failed to parse test config");
        let context = PaymentContext::from_config(&config).expect("Failed to build context");
        let coordinator = context.coordinator();
        Self {
            context,
            coordinator,
        }
    }

    /// Register a stub gateway, returning the shared instance and a
    /// counter of factory invocations
    pub fn register_stub(
        &self,
        name: &str,
        result: PaymentResult,
    ) -> (Arc<StubGateway>, Arc<AtomicUsize>) {
        let gateway = Arc::new(StubGateway::new(name, result));
        let builds = Arc::new(AtomicUsize::new(0));

        let shared = gateway.clone();
        let counter = builds.clone();
        self.context
            .gateways()
            .register(
                name,
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(shared.clone() as Arc<dyn Gateway>)
                },
                Metadata::new(),
            )
            .expect("Failed to register stub gateway");

        (gateway, builds)
    }
}
