//! # payflow
//!
//! In-process payment orchestration core. Concrete gateways plug into the
//! [`GatewayRegistry`], application callbacks plug into the
//! [`HookRegistry`], and a [`PaymentCoordinator`] ties a request's
//! lifecycle to both.
//!
//! ```rust,ignore
//! use payflow::prelude::*;
//!
//! let config = PayflowConfig::load("production")?;
//! payflow::telemetry::init_tracing(&config.logging)?;
//!
//! let context = PaymentContext::from_config(&config)?;
//! context.gateways().register("stripe", build_stripe, Metadata::new())?;
//!
//! let coordinator = context.coordinator();
//! coordinator.select_default()?;
//! let result = coordinator.pay_and_report(PaymentRequest::new(1999, "USD"))?;
//! ```

pub mod telemetry;

pub use payflow_core::config::PayflowConfig;
pub use payflow_core::{ErrorKind, PayflowError, PayflowResult};
pub use payflow_extension::{
    GatewayRegistry, Handler, HookHandler, HookPayload, HookRegistry, HookSlot, PaymentContext,
    PaymentCoordinator, ReturnPolicy, SlotConfig,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use payflow_core::config::PayflowConfig;
    pub use payflow_extension::prelude::*;
}
