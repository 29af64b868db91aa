//! Hook slot definitions, payloads and slot configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use payflow_core::config::hooks::SlotSettings;
use payflow_core::error::PayflowError;
use payflow_core::types::{
    Contract, ContractSet, PaymentRequest, PaymentResult, VerificationRequest, VerificationResult,
};

/// Enumeration of all lifecycle slots a handler can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookSlot {
    /// Fired before a payment request is handed to the gateway. Can transform
    /// the request when configured as a single-handler slot.
    BeforeProcess,
    /// Fired when the caller reports a successful payment.
    AfterSuccess,
    /// Fired when the caller reports a failed payment.
    AfterFailure,
    /// Fired before a verification request is handed to the gateway.
    BeforeVerify,
    /// Fired when the caller reports a verification outcome.
    AfterVerify,
}

impl HookSlot {
    /// All slots, in lifecycle order.
    pub const ALL: [HookSlot; 5] = [
        Self::BeforeProcess,
        Self::AfterSuccess,
        Self::AfterFailure,
        Self::BeforeVerify,
        Self::AfterVerify,
    ];

    /// Returns the string name of this slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeProcess => "before_process",
            Self::AfterSuccess => "after_success",
            Self::AfterFailure => "after_failure",
            Self::BeforeVerify => "before_verify",
            Self::AfterVerify => "after_verify",
        }
    }

    /// Returns whether this slot runs ahead of a gateway call.
    pub fn is_before_slot(&self) -> bool {
        matches!(self, Self::BeforeProcess | Self::BeforeVerify)
    }
}

impl fmt::Display for HookSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookSlot {
    type Err = PayflowError;

    /// Accepts both `before_process` and `before-process` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == normalized)
            .ok_or_else(|| PayflowError::invalid_config(format!("Unknown hook slot '{s}'")))
    }
}

/// Value passed to and returned from hook handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HookPayload {
    /// A payment request on its way to the gateway.
    Request(PaymentRequest),
    /// A payment result reported by the caller.
    Result(PaymentResult),
    /// A verification request on its way to the gateway.
    VerificationRequest(VerificationRequest),
    /// A verification result reported by the caller.
    VerificationResult(VerificationResult),
}

impl HookPayload {
    /// Returns a short name for the variant, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request(_) => "request",
            Self::Result(_) => "result",
            Self::VerificationRequest(_) => "verification_request",
            Self::VerificationResult(_) => "verification_result",
        }
    }

    /// Returns the payment request, if this payload carries one.
    pub fn as_request(&self) -> Option<&PaymentRequest> {
        match self {
            Self::Request(request) => Some(request),
            _ => None,
        }
    }

    /// Returns the payment result, if this payload carries one.
    pub fn as_result(&self) -> Option<&PaymentResult> {
        match self {
            Self::Result(result) => Some(result),
            _ => None,
        }
    }

    /// Returns the verification request, if this payload carries one.
    pub fn as_verification_request(&self) -> Option<&VerificationRequest> {
        match self {
            Self::VerificationRequest(request) => Some(request),
            _ => None,
        }
    }

    /// Returns the verification result, if this payload carries one.
    pub fn as_verification_result(&self) -> Option<&VerificationResult> {
        match self {
            Self::VerificationResult(result) => Some(result),
            _ => None,
        }
    }
}

/// What `execute` does with handler return values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPolicy {
    /// Handler results are discarded; every handler runs.
    #[default]
    Ignore,
    /// The first handler's result is handed back to the caller.
    Single,
}

impl ReturnPolicy {
    /// Returns the string name of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for ReturnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnPolicy {
    type Err = PayflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "single" => Ok(Self::Single),
            other => Err(PayflowError::invalid_config(format!(
                "Unknown return policy '{other}', expected 'ignore' or 'single'"
            ))),
        }
    }
}

/// Per-slot configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConfig {
    /// If `false`, registering a handler discards every previous one.
    pub allow_multiple: bool,
    /// Priority for handlers registered without one.
    pub default_priority: i32,
    /// What `execute` does with handler return values.
    pub return_policy: ReturnPolicy,
    /// Contracts a handler inherits when registered without its own.
    pub required_contracts: Option<ContractSet>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            allow_multiple: true,
            default_priority: 0,
            return_policy: ReturnPolicy::Ignore,
            required_contracts: None,
        }
    }
}

impl SlotConfig {
    /// Multi-handler notification slot (the implicit default).
    pub fn notification() -> Self {
        Self::default()
    }

    /// Single-handler slot whose handler result feeds back to the caller.
    pub fn transform() -> Self {
        Self {
            allow_multiple: false,
            return_policy: ReturnPolicy::Single,
            ..Self::default()
        }
    }

    /// Sets the default priority.
    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Sets the required contracts.
    pub fn with_required_contracts(mut self, contracts: ContractSet) -> Self {
        self.required_contracts = Some(contracts);
        self
    }

    /// Returns whether `execute` hands back the first handler's result.
    pub fn returns_first(&self) -> bool {
        !self.allow_multiple && self.return_policy == ReturnPolicy::Single
    }

    /// Checks the configuration for malformed values.
    pub(crate) fn validate(&self, slot: HookSlot) -> Result<(), PayflowError> {
        let has_blank_contract = self
            .required_contracts
            .as_ref()
            .is_some_and(|contracts| contracts.iter().any(|c| c.as_str().trim().is_empty()));

        if has_blank_contract {
            return Err(PayflowError::invalid_config(format!(
                "Slot '{slot}' requires a contract with an empty name"
            )));
        }

        if self.allow_multiple && self.return_policy == ReturnPolicy::Single {
            warn!(
                slot = %slot,
                "Return policy 'single' has no effect on a multi-handler slot; results will be ignored"
            );
        }

        Ok(())
    }
}

impl TryFrom<&SlotSettings> for SlotConfig {
    type Error = PayflowError;

    fn try_from(settings: &SlotSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            allow_multiple: settings.allow_multiple,
            default_priority: settings.default_priority,
            return_policy: settings.return_policy.parse()?,
            required_contracts: settings
                .required_contracts
                .as_ref()
                .map(|names| names.iter().map(|n| Contract::new(n.as_str())).collect()),
        })
    }
}
