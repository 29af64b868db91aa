//! Convenience result type alias for Payflow.

use crate::error::PayflowError;

/// A specialized `Result` type for Payflow operations.
pub type PayflowResult<T> = Result<T, PayflowError>;
