//! Capability contracts.
//!
//! A contract names a set of operations a handler or gateway exposes. Slots
//! declare the contracts a handler must carry; gateways advertise the
//! contracts they implement. Checks are plain set membership, performed when
//! a handler registers and again when it is invoked.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contract(Cow<'static, str>);

impl Contract {
    /// Two-argument transform returning a replacement payload.
    pub const TRANSFORM: Contract = Contract(Cow::Borrowed("transform"));
    /// Two-argument observer whose return value is ignored.
    pub const OBSERVER: Contract = Contract(Cow::Borrowed("observer"));
    /// Gateway capability: perform a payment.
    pub const PAY: Contract = Contract(Cow::Borrowed("pay"));
    /// Gateway capability: verify a previously issued payment.
    pub const VERIFY: Contract = Contract(Cow::Borrowed("verify"));

    /// Creates a contract from an arbitrary name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the contract name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Contract {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Contract {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// An ordered set of contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractSet(BTreeSet<Contract>);

impl ContractSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a contract, returning `self` for chaining.
    pub fn with(mut self, contract: Contract) -> Self {
        self.0.insert(contract);
        self
    }

    /// Inserts a contract. Returns `false` if it was already present.
    pub fn insert(&mut self, contract: Contract) -> bool {
        self.0.insert(contract)
    }

    /// Returns whether the set contains `contract`.
    pub fn contains(&self, contract: &Contract) -> bool {
        self.0.contains(contract)
    }

    /// Returns `true` when every contract in `required` is present in `self`.
    pub fn satisfies(&self, required: &ContractSet) -> bool {
        required.0.is_subset(&self.0)
    }

    /// Returns the contracts of `required` that `self` lacks.
    pub fn missing(&self, required: &ContractSet) -> Vec<Contract> {
        required.0.difference(&self.0).cloned().collect()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of contracts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the contracts in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Contract> {
        self.0.iter()
    }
}

impl fmt::Display for ContractSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Contract::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl FromIterator<Contract> for ContractSet {
    fn from_iter<I: IntoIterator<Item = Contract>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Contract; N]> for ContractSet {
    fn from(contracts: [Contract; N]) -> Self {
        contracts.into_iter().collect()
    }
}
