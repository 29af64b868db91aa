//! Handler forms accepted by the hook registry.

use std::fmt;
use std::sync::Arc;

use payflow_core::types::ContractSet;

use super::definitions::HookPayload;

/// Trait for handler types and pre-built handler instances.
///
/// Unlike bare functions, implementors advertise the contracts they satisfy,
/// which lets slots with required contracts accept them.
pub trait HookHandler: Send + Sync + fmt::Debug {
    /// Handles a slot invocation. `gateway` is the name of the selected
    /// gateway. Returning `None` yields the neutral result.
    fn handle(&self, payload: &HookPayload, gateway: &str) -> Option<HookPayload>;

    /// Returns the contracts this handler satisfies.
    fn contracts(&self) -> ContractSet {
        ContractSet::new()
    }
}

/// A directly invocable handler function.
pub type HookFn = Arc<dyn Fn(&HookPayload, &str) -> Option<HookPayload> + Send + Sync>;

/// The three forms a handler can be registered in.
///
/// Identity is by reference for functions and instances and by name for type
/// references, so keep a clone of the `Handler` you registered if you intend
/// to [`remove`](super::registry::HookRegistry::remove) it later.
#[derive(Clone)]
pub enum Handler {
    /// A function called as-is on every invocation.
    Invocable(HookFn),
    /// The name of a type in the registry's handler catalog, instantiated
    /// fresh on every invocation.
    Type(String),
    /// A pre-built instance shared across invocations.
    Instance(Arc<dyn HookHandler>),
}

impl Handler {
    /// Wraps a function.
    pub fn invocable<F>(f: F) -> Self
    where
        F: Fn(&HookPayload, &str) -> Option<HookPayload> + Send + Sync + 'static,
    {
        Self::Invocable(Arc::new(f))
    }

    /// References a catalog type by name.
    pub fn type_ref(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    /// Wraps an instance.
    pub fn instance<H: HookHandler + 'static>(handler: H) -> Self {
        Self::Instance(Arc::new(handler))
    }

    /// Returns a short name for the form, used in logs and errors.
    pub fn form(&self) -> &'static str {
        match self {
            Self::Invocable(_) => "invocable",
            Self::Type(_) => "type",
            Self::Instance(_) => "instance",
        }
    }

    /// Returns whether `self` and `other` refer to the same handler.
    pub fn same_as(&self, other: &Handler) -> bool {
        match (self, other) {
            (Self::Invocable(a), Self::Invocable(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            (Self::Type(a), Self::Type(b)) => a == b,
            (Self::Instance(a), Self::Instance(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invocable(_) => f.write_str("Invocable(<fn>)"),
            Self::Type(name) => f.debug_tuple("Type").field(name).finish(),
            Self::Instance(instance) => f.debug_tuple("Instance").field(instance).finish(),
        }
    }
}

impl<H: HookHandler + 'static> From<Arc<H>> for Handler {
    fn from(handler: Arc<H>) -> Self {
        Self::Instance(handler)
    }
}

/// A handler registered on a slot.
#[derive(Debug, Clone)]
pub struct HandlerDescriptor {
    /// The handler.
    pub handler: Handler,
    /// Priority (higher = earlier execution).
    pub priority: i32,
    /// Contracts validated at registration, re-checked at invocation.
    pub contracts: ContractSet,
}

impl HandlerDescriptor {
    /// Returns whether this descriptor holds the same handler with the same
    /// contracts.
    pub(crate) fn is_duplicate_of(&self, handler: &Handler, contracts: &ContractSet) -> bool {
        self.handler.same_as(handler) && &self.contracts == contracts
    }
}
