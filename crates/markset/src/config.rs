//! Construction-time configuration for marking models.
//!
//! [`MarkedModelConfig`] carries the flags that are fixed for the lifetime of
//! a model. It can be built in code or loaded from TOML/JSON, e.g. from a
//! table definition shipped with the host application:
//!
//! ```
//! use markset::config::MarkedModelConfig;
//!
//! let config = MarkedModelConfig::from_toml_str(r#"
//!     multiple = true
//!     key_field = "uuid"
//! "#).unwrap();
//!
//! assert!(config.multiple);
//! assert!(config.emit_changes);
//! assert_eq!(config.key_field, "uuid");
//! ```
//!
//! JSON documents may use either `snake_case` or `camelCase` keys
//! (`emitChanges`, `keyField`).

use markset_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::DEFAULT_KEY_FIELD;

/// Flags fixed at model construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkedModelConfig {
    /// Whether more than one record may be marked at once.
    pub multiple: bool,
    /// Whether change notifications fire.
    #[serde(alias = "emitChanges")]
    pub emit_changes: bool,
    /// Field holding the key of `serde_json::Value` records.
    #[serde(alias = "keyField")]
    pub key_field: String,
}

impl Default for MarkedModelConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            emit_changes: true,
            key_field: DEFAULT_KEY_FIELD.to_string(),
        }
    }
}

impl MarkedModelConfig {
    /// Default configuration: single selection, notifications on, key `"id"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the multiple-selection flag.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Sets whether change notifications fire.
    pub fn with_emit_changes(mut self, emit_changes: bool) -> Self {
        self.emit_changes = emit_changes;
        self
    }

    /// Sets the JSON key field.
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded TOML config");
        Ok(config)
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded JSON config");
        Ok(config)
    }

    /// Serialize this configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
