//! Hook registry — handlers registered by slot with priority ordering.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, info};

use payflow_core::error::PayflowError;
use payflow_core::result::PayflowResult;
use payflow_core::types::ContractSet;

use super::catalog::HandlerCatalog;
use super::definitions::{HookSlot, SlotConfig};
use super::handler::{Handler, HandlerDescriptor, HookHandler};

/// Configuration and handlers of a single slot.
#[derive(Debug, Default)]
pub(crate) struct SlotState {
    /// Explicit configuration, if the slot was configured.
    pub(crate) config: Option<SlotConfig>,
    /// Handlers sorted by descending priority, ties in registration order.
    pub(crate) handlers: Vec<HandlerDescriptor>,
}

/// Registry of hook handlers organized by slot.
#[derive(Default)]
pub struct HookRegistry {
    /// Slot → configuration and sorted handler list.
    pub(crate) slots: RwLock<HashMap<HookSlot, SlotState>>,
    /// Named handler types.
    pub(crate) catalog: HandlerCatalog,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration of a slot, replacing any previous one.
    ///
    /// Handlers already registered on the slot are kept as they are.
    pub fn configure_slot(&self, slot: HookSlot, config: SlotConfig) -> PayflowResult<()> {
        config.validate(slot)?;

        info!(
            slot = %slot,
            allow_multiple = config.allow_multiple,
            default_priority = config.default_priority,
            return_policy = %config.return_policy,
            "Hook slot configured"
        );

        self.slots.write().entry(slot).or_default().config = Some(config);
        Ok(())
    }

    /// Returns the effective configuration of a slot.
    pub fn slot_config(&self, slot: HookSlot) -> SlotConfig {
        self.slots
            .read()
            .get(&slot)
            .and_then(|state| state.config.clone())
            .unwrap_or_default()
    }

    /// Returns the slots that have an explicit configuration.
    pub fn configured_slots(&self) -> Vec<HookSlot> {
        let slots = self.slots.read();
        let mut configured: Vec<HookSlot> = slots
            .iter()
            .filter(|(_, state)| state.config.is_some())
            .map(|(slot, _)| *slot)
            .collect();
        configured.sort();
        configured
    }

    /// Registers a handler type that can then be referenced with
    /// [`Handler::Type`].
    pub fn register_type<F, H>(&self, name: &str, contracts: ContractSet, factory: F) -> PayflowResult<()>
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: HookHandler + 'static,
    {
        self.catalog.register(name, contracts, factory)
    }

    /// Returns whether a handler type is registered.
    pub fn has_type(&self, name: &str) -> bool {
        self.catalog.contains(name)
    }

    /// Returns the handler type catalog.
    pub fn catalog(&self) -> &HandlerCatalog {
        &self.catalog
    }

    /// Registers a handler on a slot.
    ///
    /// `priority` defaults to the slot's default priority and `contracts` to
    /// the slot's required contracts. Registering the same handler with the
    /// same contracts twice is a no-op.
    pub fn register(
        &self,
        slot: HookSlot,
        handler: Handler,
        priority: Option<i32>,
        contracts: Option<ContractSet>,
    ) -> PayflowResult<()> {
        let mut slots = self.slots.write();

        // Priority, contracts and cardinality all come from one snapshot of
        // the slot configuration, taken under the write lock.
        let config = slots
            .get(&slot)
            .and_then(|state| state.config.clone())
            .unwrap_or_default();
        let priority = priority.unwrap_or(config.default_priority);
        let contracts = contracts
            .or(config.required_contracts)
            .unwrap_or_default();
        let allow_multiple = config.allow_multiple;

        self.validate_registration(slot, &handler, &contracts)?;

        let form = handler.form();
        let state = slots.entry(slot).or_default();

        let descriptor = HandlerDescriptor {
            handler,
            priority,
            contracts,
        };

        if !allow_multiple {
            let replaced = state.handlers.len();
            state.handlers = vec![descriptor];
            info!(
                slot = %slot,
                form,
                priority,
                replaced,
                "Handler registered on single-handler slot"
            );
            return Ok(());
        }

        if state
            .handlers
            .iter()
            .any(|d| d.is_duplicate_of(&descriptor.handler, &descriptor.contracts))
        {
            debug!(slot = %slot, form, "Handler already registered, skipping");
            return Ok(());
        }

        state.handlers.push(descriptor);
        // Stable: equal priorities keep registration order.
        state.handlers.sort_by(|a, b| b.priority.cmp(&a.priority));

        info!(
            slot = %slot,
            form,
            priority,
            handler_count = state.handlers.len(),
            "Handler registered"
        );
        Ok(())
    }

    /// Removes every registration of `handler` from a slot and returns how
    /// many were removed.
    pub fn remove(&self, slot: HookSlot, handler: &Handler) -> usize {
        let mut slots = self.slots.write();
        let Some(state) = slots.get_mut(&slot) else {
            return 0;
        };

        let before = state.handlers.len();
        state.handlers.retain(|d| !d.handler.same_as(handler));
        let removed = before - state.handlers.len();

        if removed > 0 {
            info!(slot = %slot, form = handler.form(), removed, "Handler removed");
        }
        removed
    }

    /// Returns whether any handlers are registered for a slot.
    pub fn has_handlers(&self, slot: HookSlot) -> bool {
        self.slots
            .read()
            .get(&slot)
            .is_some_and(|state| !state.handlers.is_empty())
    }

    /// Returns the handlers of a slot in execution order.
    pub fn get_handlers(&self, slot: HookSlot) -> PayflowResult<Vec<HandlerDescriptor>> {
        self.slots
            .read()
            .get(&slot)
            .filter(|state| !state.handlers.is_empty())
            .map(|state| state.handlers.clone())
            .ok_or_else(|| PayflowError::slot_empty(slot))
    }

    /// Returns the number of handlers registered for a slot.
    pub fn handler_count(&self, slot: HookSlot) -> usize {
        self.slots
            .read()
            .get(&slot)
            .map_or(0, |state| state.handlers.len())
    }

    /// Removes every handler from a slot, keeping its configuration.
    pub fn clear_slot(&self, slot: HookSlot) {
        if let Some(state) = self.slots.write().get_mut(&slot) {
            state.handlers.clear();
        }
        info!(slot = %slot, "Hook slot cleared");
    }

    /// Removes every handler and slot configuration. Catalog types are kept.
    pub fn clear(&self) {
        self.slots.write().clear();
        info!("All hook slots cleared");
    }

    fn validate_registration(
        &self,
        slot: HookSlot,
        handler: &Handler,
        contracts: &ContractSet,
    ) -> PayflowResult<()> {
        match handler {
            Handler::Invocable(_) if !contracts.is_empty() => {
                Err(PayflowError::registration(format!(
                    "Slot '{slot}' requires contracts {contracts}; a bare function cannot satisfy \
                     contracts, register a handler type or instance instead"
                )))
            }
            Handler::Invocable(_) => Ok(()),
            Handler::Type(name) => {
                let declared = self.catalog.contracts(name).ok_or_else(|| {
                    PayflowError::registration(format!(
                        "Handler type '{name}' is not registered"
                    ))
                })?;
                ensure_satisfies(slot, name, &declared, contracts)
            }
            Handler::Instance(instance) => {
                ensure_satisfies(slot, &format!("{instance:?}"), &instance.contracts(), contracts)
            }
        }
    }
}

fn ensure_satisfies(
    slot: HookSlot,
    handler: &str,
    provided: &ContractSet,
    required: &ContractSet,
) -> PayflowResult<()> {
    if provided.satisfies(required) {
        return Ok(());
    }

    let missing: ContractSet = provided.missing(required).into_iter().collect();
    Err(PayflowError::registration(format!(
        "Handler '{handler}' does not satisfy contracts {missing} required on slot '{slot}'"
    )))
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read();
        let counts: HashMap<HookSlot, usize> = slots
            .iter()
            .map(|(slot, state)| (*slot, state.handlers.len()))
            .collect();
        f.debug_struct("HookRegistry")
            .field("handlers", &counts)
            .field("catalog", &self.catalog)
            .finish()
    }
}
