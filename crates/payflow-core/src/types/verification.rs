//! Verification DTOs for gateways that can confirm a payment after the fact.

use serde::{Deserialize, Serialize};

use super::metadata::Metadata;
use super::payment::PaymentStatus;

/// A request to confirm the state of a previously issued payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Provider-side transaction reference.
    pub transaction_id: String,
    /// Provider callback parameters or other gateway-specific input.
    #[serde(default)]
    pub data: Metadata,
}

impl VerificationRequest {
    /// Creates a verification request for a transaction.
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            data: Metadata::new(),
        }
    }

    /// Inserts a data value.
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }
}

/// Outcome of a verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Provider-side transaction reference.
    pub transaction_id: String,
    /// Settled status reported by the provider.
    pub status: PaymentStatus,
    /// Provider-specific data.
    #[serde(default)]
    pub data: Metadata,
}

impl VerificationResult {
    /// Creates a verification result.
    pub fn new(transaction_id: impl Into<String>, status: PaymentStatus) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            status,
            data: Metadata::new(),
        }
    }

    /// Returns whether the provider confirmed the payment.
    pub fn is_verified(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }
}
