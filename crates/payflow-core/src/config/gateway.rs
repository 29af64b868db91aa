//! Gateway selection configuration.

use serde::{Deserialize, Serialize};

/// Gateway settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Name of the gateway the coordinator selects by default.
    #[serde(default)]
    pub default: Option<String>,
}
