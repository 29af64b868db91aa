//! Slot execution.
//!
//! - Handlers run in stored priority order against a snapshot of the slot,
//!   with no registry lock held, so handlers may re-enter the registry.
//! - Type entries are instantiated fresh for every call; instance and
//!   function entries are called as-is.
//! - Contracts of type and instance entries are checked again before the
//!   call, against the same source registration used: the catalog's
//!   declared set for types, `HookHandler::contracts` for instances. A
//!   failed check aborts the execution; later handlers do not run.
//! - Only a single-handler slot with the `single` return policy hands a
//!   handler result back. Every other slot yields the neutral `None`.

use tracing::{debug, error};

use payflow_core::error::PayflowError;
use payflow_core::result::PayflowResult;
use payflow_core::types::ContractSet;

use super::definitions::{HookPayload, HookSlot};
use super::handler::{Handler, HandlerDescriptor};
use super::registry::HookRegistry;

impl HookRegistry {
    /// Runs every handler registered on `slot` with `(payload, gateway)`.
    ///
    /// An empty slot is a no-op returning `None`.
    pub fn execute(
        &self,
        slot: HookSlot,
        payload: &HookPayload,
        gateway: &str,
    ) -> PayflowResult<Option<HookPayload>> {
        let (config, handlers) = {
            let slots = self.slots.read();
            match slots.get(&slot) {
                Some(state) if !state.handlers.is_empty() => (
                    state.config.clone().unwrap_or_default(),
                    state.handlers.clone(),
                ),
                _ => return Ok(None),
            }
        };

        debug!(
            slot = %slot,
            gateway = %gateway,
            payload = payload.kind(),
            handler_count = handlers.len(),
            "Executing hook slot"
        );

        let returns_first = config.returns_first();

        for descriptor in &handlers {
            let output = self.invoke(slot, descriptor, payload, gateway)?;

            if returns_first {
                debug!(
                    slot = %slot,
                    returned = output.as_ref().map_or("none", HookPayload::kind),
                    "Handler result returned to caller"
                );
                return Ok(output);
            }
        }

        Ok(None)
    }

    fn invoke(
        &self,
        slot: HookSlot,
        descriptor: &HandlerDescriptor,
        payload: &HookPayload,
        gateway: &str,
    ) -> PayflowResult<Option<HookPayload>> {
        debug!(
            slot = %slot,
            form = descriptor.handler.form(),
            priority = descriptor.priority,
            "Invoking handler"
        );

        match &descriptor.handler {
            Handler::Invocable(f) => Ok(f(payload, gateway)),
            Handler::Type(name) => {
                let (declared, instance) =
                    self.catalog.instantiate_with_contracts(name).ok_or_else(|| {
                        error!(slot = %slot, handler_type = %name, "Handler type disappeared");
                        PayflowError::validation(format!(
                            "Handler type '{name}' on slot '{slot}' is no longer registered"
                        ))
                    })?;
                check_contracts(slot, name, &declared, &descriptor.contracts)?;
                Ok(instance.handle(payload, gateway))
            }
            Handler::Instance(instance) => {
                check_contracts(
                    slot,
                    &format!("{instance:?}"),
                    &instance.contracts(),
                    &descriptor.contracts,
                )?;
                Ok(instance.handle(payload, gateway))
            }
        }
    }
}

fn check_contracts(
    slot: HookSlot,
    handler: &str,
    provided: &ContractSet,
    required: &ContractSet,
) -> PayflowResult<()> {
    if provided.satisfies(required) {
        return Ok(());
    }

    let missing: ContractSet = provided.missing(required).into_iter().collect();
    error!(
        slot = %slot,
        handler = %handler,
        missing = %missing,
        "Handler no longer satisfies its contracts, aborting slot execution"
    );
    Err(PayflowError::validation(format!(
        "Handler '{handler}' on slot '{slot}' does not satisfy contracts {missing}"
    )))
}
