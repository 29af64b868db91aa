//! Hook system — slot definitions, handler forms, registry and execution.

pub mod catalog;
pub mod definitions;
pub mod dispatcher;
pub mod handler;
pub mod registry;

pub use catalog::{HandlerCatalog, HandlerFactory};
pub use definitions::{HookPayload, HookSlot, ReturnPolicy, SlotConfig};
pub use handler::{Handler, HandlerDescriptor, HookFn, HookHandler};
pub use registry::HookRegistry;
