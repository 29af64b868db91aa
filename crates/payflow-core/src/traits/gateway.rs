//! Gateway boundary trait for pluggable payment backends.

use crate::result::PayflowResult;
use crate::types::{
    Contract, ContractSet, Metadata, PaymentRequest, PaymentResult, VerificationRequest,
    VerificationResult,
};

/// A payment backend.
///
/// Gateways are constructed lazily by the gateway registry and shared for the
/// registry's lifetime, so implementations are expected to be stateless
/// proxies to a remote provider. Transport failures should be translated into
/// a failed [`PaymentResult`] rather than returned as errors.
pub trait Gateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the gateway name (e.g., "stripe", "paypal").
    fn name(&self) -> &str;

    /// Return the gateway's configuration or display data.
    fn config(&self) -> Metadata {
        Metadata::new()
    }

    /// Perform a payment.
    fn pay(&self, request: &PaymentRequest) -> PayflowResult<PaymentResult>;

    /// Return the verification capability, if this gateway has one.
    fn as_verifier(&self) -> Option<&dyn Verifier> {
        None
    }

    /// Return the capability set advertised by this gateway.
    fn capabilities(&self) -> ContractSet {
        let caps = ContractSet::from([Contract::PAY]);
        if self.as_verifier().is_some() {
            caps.with(Contract::VERIFY)
        } else {
            caps
        }
    }
}

/// Optional capability: confirm a payment after the fact.
pub trait Verifier: Send + Sync {
    /// Verify a previously issued payment.
    fn verify(&self, request: &VerificationRequest) -> PayflowResult<VerificationResult>;
}
