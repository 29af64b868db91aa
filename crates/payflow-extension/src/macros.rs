//! Convenience macros for building handler and slot declarations.

/// Macro for building a `ContractSet` from contract names or constants.
///
/// # Example
/// ```rust,ignore
/// let required = contracts!["transform", "audit"];
/// let provided = contracts![Contract::OBSERVER];
/// ```
#[macro_export]
macro_rules! contracts {
    () => {
        $crate::prelude::ContractSet::new()
    };
    ($($contract:expr),+ $(,)?) => {{
        let mut set = $crate::prelude::ContractSet::new();
        $(
            set.insert($crate::prelude::Contract::from($contract));
        )+
        set
    }};
}
