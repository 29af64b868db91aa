//! # payflow-core
//!
//! Core crate for Payflow. Contains the unified error system, the
//! configuration schema, payment DTOs, capability contracts and the
//! [`Gateway`](traits::gateway::Gateway) boundary trait implemented by
//! concrete payment backends.
//!
//! This crate has **no** internal dependencies on other Payflow crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, PayflowError};
pub use result::PayflowResult;
