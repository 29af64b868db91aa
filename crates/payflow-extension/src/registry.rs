//! Gateway registry — named factories resolved lazily into shared instances.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use payflow_core::error::PayflowError;
use payflow_core::result::PayflowResult;
use payflow_core::traits::Gateway;
use payflow_core::types::Metadata;

/// Deferred gateway constructor.
pub type GatewayFactory = Arc<dyn Fn() -> PayflowResult<Arc<dyn Gateway>> + Send + Sync>;

/// Entry in the gateway registry.
struct GatewayEntry {
    /// Constructor, invoked on first resolution.
    factory: GatewayFactory,
    /// Opaque metadata passed through untouched.
    metadata: Metadata,
    /// Cached instance once resolved.
    instance: Option<Arc<dyn Gateway>>,
}

impl fmt::Debug for GatewayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayEntry")
            .field("metadata", &self.metadata)
            .field("instantiated", &self.instance.is_some())
            .finish()
    }
}

/// Registry of payment gateways.
///
/// Each name maps to a factory invoked at most once per registration; the
/// resulting instance is shared until the name is unregistered, registered
/// again, or the registry is cleared. Factories run under the registry's
/// write lock and must not call back into the registry.
#[derive(Debug, Default)]
pub struct GatewayRegistry {
    /// Gateway name → factory, metadata and cached instance.
    entries: RwLock<BTreeMap<String, GatewayEntry>>,
}

impl GatewayRegistry {
    /// Creates a new empty gateway registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gateway factory under `name`.
    ///
    /// Replaces any previous registration and drops its cached instance.
    pub fn register<F>(&self, name: &str, factory: F, metadata: Metadata) -> PayflowResult<()>
    where
        F: Fn() -> PayflowResult<Arc<dyn Gateway>> + Send + Sync + 'static,
    {
        if name.trim().is_empty() {
            return Err(PayflowError::invalid_name("Gateway name must not be empty"));
        }

        let entry = GatewayEntry {
            factory: Arc::new(factory),
            metadata,
            instance: None,
        };

        let previous = self.entries.write().insert(name.to_string(), entry);

        match previous {
            Some(old) => info!(
                gateway = %name,
                dropped_instance = old.instance.is_some(),
                "Gateway re-registered"
            ),
            None => info!(gateway = %name, "Gateway registered"),
        }

        Ok(())
    }

    /// Removes a gateway and its cached instance.
    pub fn unregister(&self, name: &str) -> PayflowResult<()> {
        self.entries
            .write()
            .remove(name)
            .ok_or_else(|| PayflowError::gateway_not_found(name))?;

        info!(gateway = %name, "Gateway unregistered");
        Ok(())
    }

    /// Checks whether a gateway is registered. Never instantiates.
    pub fn has(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Returns whether the gateway has been instantiated.
    pub fn is_instantiated(&self, name: &str) -> bool {
        self.entries
            .read()
            .get(name)
            .is_some_and(|entry| entry.instance.is_some())
    }

    /// Resolves a gateway, constructing it on first access.
    ///
    /// A factory error caches nothing; the next call retries construction.
    pub fn get(&self, name: &str) -> PayflowResult<Arc<dyn Gateway>> {
        {
            let entries = self.entries.read();
            let entry = entries
                .get(name)
                .ok_or_else(|| PayflowError::gateway_not_found(name))?;
            if let Some(instance) = &entry.instance {
                return Ok(instance.clone());
            }
        }

        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(name)
            .ok_or_else(|| PayflowError::gateway_not_found(name))?;

        // Another caller may have constructed it between the two locks.
        if let Some(instance) = &entry.instance {
            return Ok(instance.clone());
        }

        let instance = (entry.factory)().inspect_err(|e| {
            warn!(gateway = %name, error = %e, "Gateway construction failed");
        })?;
        entry.instance = Some(instance.clone());

        debug!(gateway = %name, "Gateway instantiated");
        Ok(instance)
    }

    /// Returns the metadata registered with a gateway.
    pub fn get_metadata(&self, name: &str) -> PayflowResult<Metadata> {
        self.entries
            .read()
            .get(name)
            .map(|entry| entry.metadata.clone())
            .ok_or_else(|| PayflowError::gateway_not_found(name))
    }

    /// Lists registered gateway names, sorted.
    ///
    /// With `instantiated`, every gateway is resolved before returning and
    /// the first construction failure is propagated.
    pub fn all(&self, instantiated: bool) -> PayflowResult<Vec<String>> {
        let names: Vec<String> = self.entries.read().keys().cloned().collect();

        if instantiated {
            for name in &names {
                self.get(name)?;
            }
        }

        Ok(names)
    }

    /// Resolves every registered gateway, in name order.
    pub fn instances(&self) -> PayflowResult<Vec<Arc<dyn Gateway>>> {
        self.all(false)?
            .iter()
            .map(|name| self.get(name))
            .collect()
    }

    /// Returns the number of registered gateways.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns whether no gateways are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every gateway and cached instance.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        info!(count, "Gateway registry cleared");
    }
}
