//! Unified error types for Payflow.
//!
//! Every registry, coordinator and configuration failure is reported as a
//! [`PayflowError`] whose [`ErrorKind`] callers can inspect and match on.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across Payflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A gateway or handler type was registered under an empty name.
    InvalidName,
    /// A slot configuration value is malformed or unrecognized.
    InvalidConfig,
    /// No gateway is registered under the requested name.
    GatewayNotFound,
    /// The requested hook slot has no registered handlers.
    SlotEmpty,
    /// A handler violated a registration-time constraint.
    Registration,
    /// A capability check failed while a slot was executing.
    Validation,
    /// The coordinator was used before a gateway was selected.
    NoGatewaySelected,
    /// The selected gateway lacks the requested capability.
    UnsupportedFeature,
    /// A gateway collaborator reported a failure it could not map to a result.
    Gateway,
    /// Configuration could not be loaded.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "INVALID_NAME"),
            Self::InvalidConfig => write!(f, "INVALID_CONFIG"),
            Self::GatewayNotFound => write!(f, "GATEWAY_NOT_FOUND"),
            Self::SlotEmpty => write!(f, "SLOT_EMPTY"),
            Self::Registration => write!(f, "REGISTRATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NoGatewaySelected => write!(f, "NO_GATEWAY_SELECTED"),
            Self::UnsupportedFeature => write!(f, "UNSUPPORTED_FEATURE"),
            Self::Gateway => write!(f, "GATEWAY"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified error used throughout Payflow.
///
/// Errors are never retried or suppressed by the core; they propagate to the
/// immediate caller, which decides what to do based on [`PayflowError::kind`].
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct PayflowError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PayflowError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Create an invalid-name error.
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidName, message)
    }

    /// Create an invalid-config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, message)
    }

    /// Create a gateway-not-found error for the given gateway name.
    pub fn gateway_not_found(name: &str) -> Self {
        Self::new(
            ErrorKind::GatewayNotFound,
            format!("Gateway '{name}' is not registered"),
        )
    }

    /// Create a slot-empty error for the given slot name.
    pub fn slot_empty(slot: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::SlotEmpty,
            format!("No handlers registered for slot '{slot}'"),
        )
    }

    /// Create a registration error.
    pub fn registration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Registration, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a no-gateway-selected error.
    pub fn no_gateway_selected() -> Self {
        Self::new(
            ErrorKind::NoGatewaySelected,
            "No gateway selected; call select_gateway first",
        )
    }

    /// Create an unsupported-feature error.
    pub fn unsupported_feature(gateway: &str, feature: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnsupportedFeature,
            format!("Gateway '{gateway}' does not support '{feature}'"),
        )
    }

    /// Create a gateway error.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Gateway, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for PayflowError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for PayflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for PayflowError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
