//! # payflow-extension
//!
//! Extension core for Payflow. Provides:
//!
//! - Gateway registry with lazily constructed, shared gateway instances
//! - Hook registry with per-slot configuration, priority ordering,
//!   idempotent registration and capability contracts
//! - Slot execution with notification and transform return policies
//! - Payment context owning both registries
//! - Payment coordinator driving the request lifecycle

pub mod context;
pub mod coordinator;
pub mod hooks;
pub mod macros;
pub mod prelude;
pub mod registry;

pub use context::PaymentContext;
pub use coordinator::PaymentCoordinator;
pub use hooks::definitions::{HookPayload, HookSlot, ReturnPolicy, SlotConfig};
pub use hooks::handler::{Handler, HandlerDescriptor, HookHandler};
pub use hooks::registry::HookRegistry;
pub use registry::GatewayRegistry;
