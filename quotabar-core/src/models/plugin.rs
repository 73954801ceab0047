//! Plugin descriptor types.
//!
//! This module contains the types the host consumes for plugin discovery
//! and pre-flight checks:
//! - [`PluginMetadata`] - Static descriptor (declared, not computed)
//! - [`ConfigCheck`] - Result of `validate_config`

use serde::{Deserialize, Serialize};

use super::balance::DataType;

// ============================================================================
// Plugin Type
// ============================================================================

/// Category of plugin as seen by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginType {
    /// Data-producing plugin.
    #[default]
    Data,
}

// ============================================================================
// Plugin Metadata
// ============================================================================

/// Static descriptor for one plugin, consumed by the host for discovery
/// and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    /// Stable plugin identifier (e.g. `88code-balance`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Plugin version.
    pub version: String,
    /// Host API version this plugin targets.
    pub api_version: String,
    /// Plugin category.
    pub plugin_type: PluginType,
    /// Semantic category of the produced data.
    pub data_type: DataType,
    /// Plugin author.
    pub author: String,
    /// Short description of what the plugin queries.
    pub description: String,
}

impl PluginMetadata {
    /// Creates metadata for a balance plugin with the common defaults.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            api_version: "1.0".to_string(),
            plugin_type: PluginType::Data,
            data_type: DataType::Balance,
            author: "Quotabar Contributors".to_string(),
            description: description.into(),
        }
    }
}

// ============================================================================
// Config Check
// ============================================================================

/// Result of a synchronous pre-flight configuration check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCheck {
    /// Whether the configuration is usable.
    pub valid: bool,
    /// Human-readable reason when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConfigCheck {
    /// A passing check.
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing check with a reason.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
