//! Prelude for convenient imports.

pub use payflow_core::error::{ErrorKind, PayflowError};
pub use payflow_core::result::PayflowResult;
pub use payflow_core::traits::{Gateway, Verifier};
pub use payflow_core::types::{
    Contract, ContractSet, Metadata, PaymentId, PaymentRequest, PaymentResult, PaymentStatus,
    VerificationRequest, VerificationResult,
};

pub use crate::context::PaymentContext;
pub use crate::coordinator::PaymentCoordinator;
pub use crate::hooks::definitions::{HookPayload, HookSlot, ReturnPolicy, SlotConfig};
pub use crate::hooks::handler::{Handler, HandlerDescriptor, HookHandler};
pub use crate::hooks::registry::HookRegistry;
pub use crate::registry::GatewayRegistry;

pub use crate::contracts;
