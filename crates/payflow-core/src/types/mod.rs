//! Core type definitions used across the Payflow workspace.

pub mod contract;
pub mod id;
pub mod metadata;
pub mod payment;
pub mod verification;

pub use contract::{Contract, ContractSet};
pub use id::PaymentId;
pub use metadata::Metadata;
pub use payment::{PaymentRequest, PaymentResult, PaymentStatus};
pub use verification::{VerificationRequest, VerificationResult};
