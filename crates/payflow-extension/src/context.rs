//! Payment context — the registries shared by everything that takes part in
//! a payment.

use std::sync::Arc;

use tracing::info;

use payflow_core::config::PayflowConfig;
use payflow_core::result::PayflowResult;

use crate::coordinator::PaymentCoordinator;
use crate::hooks::definitions::{HookSlot, SlotConfig};
use crate::hooks::registry::HookRegistry;
use crate::registry::GatewayRegistry;

/// Process-wide registries, built once at startup and handed by reference to
/// coordinators and application code.
///
/// Each context is independent, so tests can build as many as they need.
#[derive(Debug, Clone, Default)]
pub struct PaymentContext {
    /// Gateway registry.
    gateways: Arc<GatewayRegistry>,
    /// Hook registry.
    hooks: Arc<HookRegistry>,
    /// Gateway selected by [`PaymentCoordinator::select_default`].
    default_gateway: Option<String>,
}

impl PaymentContext {
    /// Creates a context with empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context and applies every slot configured in `config`.
    pub fn from_config(config: &PayflowConfig) -> PayflowResult<Self> {
        let context = Self {
            default_gateway: config.gateways.default.clone(),
            ..Self::default()
        };

        for (key, settings) in &config.hooks {
            let slot: HookSlot = key.parse()?;
            context
                .hooks
                .configure_slot(slot, SlotConfig::try_from(settings)?)?;
        }

        info!(
            configured_slots = config.hooks.len(),
            default_gateway = ?context.default_gateway,
            "Payment context initialized"
        );

        Ok(context)
    }

    /// Returns the gateway registry.
    pub fn gateways(&self) -> &Arc<GatewayRegistry> {
        &self.gateways
    }

    /// Returns the hook registry.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// Returns the configured default gateway name.
    pub fn default_gateway(&self) -> Option<&str> {
        self.default_gateway.as_deref()
    }

    /// Creates a coordinator bound to this context's registries.
    pub fn coordinator(&self) -> PaymentCoordinator {
        PaymentCoordinator::new(self.gateways.clone(), self.hooks.clone())
            .with_default_gateway(self.default_gateway.clone())
    }
}
