//! Hook slot configuration as it appears in configuration files.
//!
//! Values are kept as raw strings here; the hook registry validates them
//! when the settings are applied to a slot.

use serde::{Deserialize, Serialize};

/// Settings for a single hook slot, e.g. `[hooks.before_process]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSettings {
    /// Whether more than one handler may be registered.
    #[serde(default = "default_true")]
    pub allow_multiple: bool,
    /// Priority for handlers registered without one.
    #[serde(default)]
    pub default_priority: i32,
    /// `"ignore"` or `"single"`.
    #[serde(default = "default_return_policy")]
    pub return_policy: String,
    /// Contract names every handler must carry.
    #[serde(default)]
    pub required_contracts: Option<Vec<String>>,
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self {
            allow_multiple: true,
            default_priority: 0,
            return_policy: default_return_policy(),
            required_contracts: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_return_policy() -> String {
    "ignore".to_string()
}
