//! Boundary traits defined in `payflow-core` and implemented by gateway
//! crates outside this workspace.

pub mod gateway;

pub use gateway::{Gateway, Verifier};
