//! Configuration for imbib-core
//!
//! Centralized settings for field naming, editor layout and bulk
//! operations. Loadable from TOML or JSON.

use std::path::Path;

use impress_fields::{FieldRegistry, OwnerPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImbibConfig {
    /// Dynamic field naming
    pub fields: FieldConfig,
    /// Editor layout
    pub editor: EditorConfig,
    /// Bulk operation behavior
    pub bulk: BulkConfig,
}

/// Dynamic field naming configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// How owner names become field name tokens
    pub owner_policy: OwnerPolicy,
}

impl FieldConfig {
    /// A fresh registry minting dynamic fields under the configured policy.
    pub fn registry(&self) -> FieldRegistry {
        FieldRegistry::with_policy(self.owner_policy)
    }
}

/// Editor layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Weight of each editable field row
    pub content_row_weight: u32,
    /// Weight of the trailing action row
    pub action_row_weight: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            content_row_weight: 3,
            action_row_weight: 1,
        }
    }
}

/// Bulk operation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Emit a progress event every this many entries
    pub progress_interval: usize,
    /// Send a notification when an action starts
    pub notify_on_start: bool,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            progress_interval: 25,
            notify_on_start: true,
        }
    }
}

impl ImbibConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration file. `.json` files are read as
    /// JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.content_row_weight == 0 {
            return Err(ConfigError::OutOfRange(
                "editor.content_row_weight must be positive".to_string(),
            ));
        }

        if self.editor.action_row_weight == 0 {
            return Err(ConfigError::OutOfRange(
                "editor.action_row_weight must be positive".to_string(),
            ));
        }

        if self.bulk.progress_interval == 0 {
            return Err(ConfigError::OutOfRange(
                "bulk.progress_interval must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("Invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Malformed JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
