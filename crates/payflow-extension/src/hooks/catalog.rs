//! Catalog of named handler types.
//!
//! A type reference registered on a slot is only a name; the catalog maps it
//! to the contracts the type declares and a constructor invoked on every
//! slot execution. The declared contracts are what registration validates
//! and what execution re-checks; the built instance's own
//! [`HookHandler::contracts`] is not consulted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use payflow_core::error::PayflowError;
use payflow_core::result::PayflowResult;
use payflow_core::types::ContractSet;

use super::handler::HookHandler;

/// Constructor for a catalog type.
pub type HandlerFactory = Arc<dyn Fn() -> Box<dyn HookHandler> + Send + Sync>;

/// Entry in the handler catalog.
#[derive(Clone)]
struct HandlerType {
    /// Contracts the type declares.
    contracts: ContractSet,
    /// Constructor.
    factory: HandlerFactory,
}

/// Registry of handler types that can be referenced by name.
#[derive(Default)]
pub struct HandlerCatalog {
    /// Type name → declared contracts and constructor.
    types: RwLock<HashMap<String, HandlerType>>,
}

impl HandlerCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler type, replacing any type with the same name.
    pub fn register<F, H>(&self, name: &str, contracts: ContractSet, factory: F) -> PayflowResult<()>
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: HookHandler + 'static,
    {
        if name.trim().is_empty() {
            return Err(PayflowError::invalid_name(
                "Handler type name must not be empty",
            ));
        }

        let entry = HandlerType {
            contracts: contracts.clone(),
            factory: Arc::new(move || Box::new(factory()) as Box<dyn HookHandler>),
        };
        self.types.write().insert(name.to_string(), entry);

        info!(handler_type = %name, contracts = %contracts, "Handler type registered");
        Ok(())
    }

    /// Removes a handler type. Returns `false` if it was not registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.types.write().remove(name).is_some()
    }

    /// Returns whether a type with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Returns the contracts a type declares.
    pub fn contracts(&self, name: &str) -> Option<ContractSet> {
        self.types.read().get(name).map(|t| t.contracts.clone())
    }

    /// Builds a fresh instance of a type.
    ///
    /// The constructor runs without the catalog lock held.
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn HookHandler>> {
        self.instantiate_with_contracts(name)
            .map(|(_, instance)| instance)
    }

    /// Builds a fresh instance of a type together with the contracts the
    /// type declares, read under one lock acquisition.
    pub fn instantiate_with_contracts(
        &self,
        name: &str,
    ) -> Option<(ContractSet, Box<dyn HookHandler>)> {
        let (contracts, factory) = self
            .types
            .read()
            .get(name)
            .map(|t| (t.contracts.clone(), t.factory.clone()))?;
        Some((contracts, factory()))
    }

    /// Returns all registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for HandlerCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerCatalog")
            .field("types", &self.names())
            .finish()
    }
}
