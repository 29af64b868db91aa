//! Payment request/result DTOs exchanged between the coordinator, hooks and
//! gateways.
//!
//! Provider-specific payload shapes are left to each gateway; anything the
//! common fields do not cover travels in the `fields`/`data` bags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::PaymentId;
use super::metadata::Metadata;

/// A request to charge a payer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Request identifier.
    pub id: PaymentId,
    /// Amount in the currency's minor unit.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Where the provider should send the payer back to, if applicable.
    pub callback_url: Option<String>,
    /// Free-form fields, e.g. values injected by `before-process` hooks.
    #[serde(default)]
    pub fields: Metadata,
    /// When the request was built.
    pub created_at: DateTime<Utc>,
}

impl PaymentRequest {
    /// Creates a new request for `amount` minor units of `currency`.
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            id: PaymentId::new(),
            amount,
            currency: currency.into(),
            description: None,
            callback_url: None,
            fields: Metadata::new(),
            created_at: Utc::now(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the callback URL.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Inserts a free-form field.
    pub fn with_field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Gets a free-form field.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// Outcome reported by a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// The provider confirmed the charge.
    Succeeded,
    /// The provider accepted the request but has not settled it yet
    /// (redirects, asynchronous confirmation).
    Pending,
    /// The provider rejected the request or it could not be delivered.
    Failed,
}

impl PaymentStatus {
    /// Returns the string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a payment operation, already normalized by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// The request this result answers, when known.
    pub request_id: Option<PaymentId>,
    /// Outcome.
    pub status: PaymentStatus,
    /// Provider-side transaction reference.
    pub transaction_id: Option<String>,
    /// Provider or gateway message, typically set on failure.
    pub message: Option<String>,
    /// Provider-specific data the coordinator does not interpret.
    #[serde(default)]
    pub data: Metadata,
}

impl PaymentResult {
    /// Creates a result with the given status and no other fields.
    pub fn new(status: PaymentStatus) -> Self {
        Self {
            request_id: None,
            status,
            transaction_id: None,
            message: None,
            data: Metadata::new(),
        }
    }

    /// Creates a successful result carrying the provider transaction id.
    pub fn succeeded(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
            ..Self::new(PaymentStatus::Succeeded)
        }
    }

    /// Creates a pending result.
    pub fn pending(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
            ..Self::new(PaymentStatus::Pending)
        }
    }

    /// Creates a failed result with a reason.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(PaymentStatus::Failed)
        }
    }

    /// Links the result to a request.
    pub fn for_request(mut self, request_id: PaymentId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Inserts a provider data value.
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Returns whether the provider confirmed the charge.
    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }

    /// Returns whether the charge failed.
    pub fn is_failure(&self) -> bool {
        self.status == PaymentStatus::Failed
    }
}
