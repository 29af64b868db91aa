//! Opaque key-value bag attached to gateways and DTOs.

/// Arbitrary configuration or display data.
///
/// Registries pass metadata through untouched; only gateways and
/// application code interpret its contents.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
