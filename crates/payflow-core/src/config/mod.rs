//! Configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod gateway;
pub mod hooks;
pub mod logging;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use self::gateway::GatewaySettings;
use self::hooks::SlotSettings;
use self::logging::LoggingConfig;

use crate::error::PayflowError;

/// Root configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayflowConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Gateway selection settings.
    #[serde(default)]
    pub gateways: GatewaySettings,
    /// Hook slot settings keyed by slot name (e.g. `before_process`).
    #[serde(default)]
    pub hooks: BTreeMap<String, SlotSettings>,
}

impl PayflowConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `PAYFLOW_`.
    pub fn load(env: &str) -> Result<Self, PayflowError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PAYFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| PayflowError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| PayflowError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, PayflowError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
