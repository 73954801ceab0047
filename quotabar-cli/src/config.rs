//! Plugin config file loading.
//!
//! The config file is a JSON object keyed by plugin id; each value is the
//! opaque config object handed to that plugin. The default location is
//! `<config dir>/quotabar/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use quotabar_core::PluginConfig;
use serde_json::Value;

/// Returns the default config file path, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quotabar").join("config.json"))
}

/// Loaded config file: plugin id → plugin config object.
#[derive(Debug, Default)]
pub struct ConfigFile {
    entries: serde_json::Map<String, Value>,
}

impl ConfigFile {
    /// Loads the config file.
    ///
    /// An explicitly given path must exist; a missing default path just
    /// means nothing is configured.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = if let Some(path) = explicit {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            path.to_path_buf()
        } else {
            let Some(path) = default_config_path() else {
                return Ok(Self::default());
            };
            if !path.exists() {
                return Ok(Self::default());
            }
            path
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Parses config file contents.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("config file is not valid JSON")?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => bail!("config file must be a JSON object keyed by plugin id"),
        }
    }

    /// Returns the config for a plugin, if one is present.
    pub fn get(&self, id: &str) -> Result<Option<PluginConfig>> {
        match self.entries.get(id) {
            Some(value) => Ok(Some(PluginConfig::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Returns true if the plugin has a config entry.
    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let file = ConfigFile::from_json_str(
            r#"{
                "zhipu-balance": { "apiKey": "key-12345678901234567890" },
                "right-code": { "apiKey": "key-1234567890" }
            }"#,
        )
        .unwrap();

        assert!(file.has("zhipu-balance"));
        assert!(!file.has("antigravity"));

        let config = file.get("zhipu-balance").unwrap().unwrap();
        assert_eq!(config.get_str("apiKey"), Some("key-12345678901234567890"));
        assert!(file.get("antigravity").unwrap().is_none());
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(ConfigFile::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_rejects_non_object_entry() {
        let file = ConfigFile::from_json_str(r#"{"zhipu-balance": "oops"}"#).unwrap();
        assert!(file.get("zhipu-balance").is_err());
    }
}
