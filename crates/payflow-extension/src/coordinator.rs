//! Payment coordinator — drives a request through hooks and the selected
//! gateway.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use payflow_core::error::PayflowError;
use payflow_core::result::PayflowResult;
use payflow_core::traits::Gateway;
use payflow_core::types::{
    Contract, Metadata, PaymentRequest, PaymentResult, PaymentStatus, VerificationRequest,
    VerificationResult,
};

use crate::hooks::definitions::{HookPayload, HookSlot};
use crate::hooks::registry::HookRegistry;
use crate::registry::GatewayRegistry;

/// The selected gateway. The registry owns the instance; the coordinator
/// only keeps a lookup handle.
#[derive(Debug, Clone)]
struct Selection {
    /// Registered gateway name.
    name: String,
    /// Handle to the resolved instance.
    gateway: Weak<dyn Gateway>,
}

/// Coordinates the payment lifecycle across the gateway and hook registries.
///
/// Starts unselected; [`select_gateway`](Self::select_gateway) must succeed
/// before any operation that talks to a gateway.
#[derive(Debug)]
pub struct PaymentCoordinator {
    /// Gateway registry.
    gateways: Arc<GatewayRegistry>,
    /// Hook registry.
    hooks: Arc<HookRegistry>,
    /// Name selected by [`select_default`](Self::select_default).
    default_gateway: Option<String>,
    /// Currently selected gateway.
    selected: RwLock<Option<Selection>>,
}

impl PaymentCoordinator {
    /// Creates an unselected coordinator.
    pub fn new(gateways: Arc<GatewayRegistry>, hooks: Arc<HookRegistry>) -> Self {
        Self {
            gateways,
            hooks,
            default_gateway: None,
            selected: RwLock::new(None),
        }
    }

    /// Sets the gateway picked by [`select_default`](Self::select_default).
    pub fn with_default_gateway(mut self, name: Option<String>) -> Self {
        self.default_gateway = name;
        self
    }

    /// Selects a gateway by name, resolving it through the registry.
    pub fn select_gateway(&self, name: &str) -> PayflowResult<()> {
        let gateway = self.gateways.get(name)?;

        *self.selected.write() = Some(Selection {
            name: name.to_string(),
            gateway: Arc::downgrade(&gateway),
        });

        info!(gateway = %name, "Gateway selected");
        Ok(())
    }

    /// Selects the configured default gateway.
    ///
    /// Returns `Ok(false)` when no default is configured.
    pub fn select_default(&self) -> PayflowResult<bool> {
        match self.default_gateway.clone() {
            Some(name) => self.select_gateway(&name).map(|()| true),
            None => Ok(false),
        }
    }

    /// Returns the selected gateway name.
    pub fn selected_gateway_name(&self) -> Option<String> {
        self.selected.read().as_ref().map(|s| s.name.clone())
    }

    /// Clears the selection.
    pub fn reset(&self) {
        if let Some(previous) = self.selected.write().take() {
            info!(gateway = %previous.name, "Gateway selection cleared");
        }
    }

    /// Returns the selected gateway's own configuration.
    pub fn gateway_config(&self) -> PayflowResult<Metadata> {
        let (_, gateway) = self.current()?;
        Ok(gateway.config())
    }

    /// Runs `before-process` and hands the request to the selected gateway.
    ///
    /// If `before-process` is a transform slot, the request it returns
    /// replaces the caller's. Success and failure hooks are not fired here;
    /// see [`report_success`](Self::report_success),
    /// [`report_failure`](Self::report_failure) and
    /// [`pay_and_report`](Self::pay_and_report).
    pub fn pay(&self, request: PaymentRequest) -> PayflowResult<PaymentResult> {
        let (name, gateway) = self.current()?;

        let payload = HookPayload::Request(request.clone());
        let request = match self.hooks.execute(HookSlot::BeforeProcess, &payload, &name)? {
            None => request,
            Some(HookPayload::Request(modified)) => {
                debug!(gateway = %name, "Request replaced by before_process handler");
                modified
            }
            Some(other) => return Err(unexpected_payload(HookSlot::BeforeProcess, &other)),
        };

        debug!(
            gateway = %name,
            payment_id = %request.id,
            amount = request.amount,
            currency = %request.currency,
            "Dispatching payment to gateway"
        );

        let result = gateway.pay(&request)?;

        info!(
            gateway = %name,
            payment_id = %request.id,
            status = %result.status,
            "Payment processed"
        );
        Ok(result)
    }

    /// Fires `after-success` with the result.
    pub fn report_success(&self, result: &PaymentResult) -> PayflowResult<Option<HookPayload>> {
        self.report(HookSlot::AfterSuccess, HookPayload::Result(result.clone()))
    }

    /// Fires `after-failure` with the result.
    pub fn report_failure(&self, result: &PaymentResult) -> PayflowResult<Option<HookPayload>> {
        self.report(HookSlot::AfterFailure, HookPayload::Result(result.clone()))
    }

    /// Pays, then fires `after-success` or `after-failure` by result status.
    ///
    /// Pending results fire neither; the caller finalizes them later.
    pub fn pay_and_report(&self, request: PaymentRequest) -> PayflowResult<PaymentResult> {
        let result = self.pay(request)?;

        match result.status {
            PaymentStatus::Succeeded => {
                self.report_success(&result)?;
            }
            PaymentStatus::Failed => {
                self.report_failure(&result)?;
            }
            PaymentStatus::Pending => {
                debug!("Payment pending, no outcome hook fired");
            }
        }

        Ok(result)
    }

    /// Runs `before-verify` and asks the selected gateway to verify.
    ///
    /// Fails with `UnsupportedFeature` when the gateway does not advertise
    /// the `verify` capability.
    pub fn verify(&self, request: VerificationRequest) -> PayflowResult<VerificationResult> {
        let (name, gateway) = self.current()?;

        if !gateway.capabilities().contains(&Contract::VERIFY) {
            return Err(PayflowError::unsupported_feature(&name, Contract::VERIFY));
        }
        let verifier = gateway
            .as_verifier()
            .ok_or_else(|| PayflowError::unsupported_feature(&name, Contract::VERIFY))?;

        let payload = HookPayload::VerificationRequest(request.clone());
        let request = match self.hooks.execute(HookSlot::BeforeVerify, &payload, &name)? {
            None => request,
            Some(HookPayload::VerificationRequest(modified)) => modified,
            Some(other) => return Err(unexpected_payload(HookSlot::BeforeVerify, &other)),
        };

        let result = verifier.verify(&request)?;

        info!(
            gateway = %name,
            transaction_id = %result.transaction_id,
            status = %result.status,
            "Payment verified"
        );
        Ok(result)
    }

    /// Fires `after-verify` with the verification result.
    pub fn report_verified(
        &self,
        result: &VerificationResult,
    ) -> PayflowResult<Option<HookPayload>> {
        self.report(
            HookSlot::AfterVerify,
            HookPayload::VerificationResult(result.clone()),
        )
    }

    /// Applies `f` to every registered gateway, instantiating each.
    pub fn map<T, F>(&self, mut f: F) -> PayflowResult<Vec<T>>
    where
        F: FnMut(&dyn Gateway) -> T,
    {
        Ok(self
            .gateways
            .instances()?
            .iter()
            .map(|gateway| f(gateway.as_ref()))
            .collect())
    }

    /// Returns every registered gateway for which `f` holds, instantiating
    /// each.
    pub fn filter<F>(&self, mut f: F) -> PayflowResult<Vec<Arc<dyn Gateway>>>
    where
        F: FnMut(&dyn Gateway) -> bool,
    {
        Ok(self
            .gateways
            .instances()?
            .into_iter()
            .filter(|gateway| f(gateway.as_ref()))
            .collect())
    }

    /// Returns the gateway registry.
    pub fn gateways(&self) -> &Arc<GatewayRegistry> {
        &self.gateways
    }

    /// Returns the hook registry.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    fn report(&self, slot: HookSlot, payload: HookPayload) -> PayflowResult<Option<HookPayload>> {
        let (name, _) = self.current()?;
        self.hooks.execute(slot, &payload, &name)
    }

    /// Returns the selected gateway as the registry currently serves it.
    ///
    /// Fails with `GatewayNotFound` once the selected name is unregistered,
    /// even if the previously resolved instance is still alive elsewhere.
    fn current(&self) -> PayflowResult<(String, Arc<dyn Gateway>)> {
        let selection = self
            .selected
            .read()
            .clone()
            .ok_or_else(PayflowError::no_gateway_selected)?;

        let gateway = self.gateways.get(&selection.name)?;

        if !std::ptr::addr_eq(selection.gateway.as_ptr(), Arc::as_ptr(&gateway)) {
            warn!(
                gateway = %selection.name,
                "Selected gateway was re-registered, following the new instance"
            );
            *self.selected.write() = Some(Selection {
                name: selection.name.clone(),
                gateway: Arc::downgrade(&gateway),
            });
        }

        Ok((selection.name, gateway))
    }
}

fn unexpected_payload(slot: HookSlot, payload: &HookPayload) -> PayflowError {
    PayflowError::validation(format!(
        "Handler on slot '{slot}' returned a '{}' payload",
        payload.kind()
    ))
}
