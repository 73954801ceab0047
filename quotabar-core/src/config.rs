//! Plugin configuration handling.
//!
//! The host hands each plugin an opaque JSON object. [`PluginConfig`] wraps
//! that object and lets a plugin deserialize its own typed view of it.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::PluginError;

// ============================================================================
// Plugin Config
// ============================================================================

/// Host-supplied configuration for one plugin.
///
/// Keys are plugin-specific (camelCase, matching the host's config storage).
/// Values are arbitrary JSON; plugins typically read strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginConfig(Map<String, Value>);

impl PluginConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns `PluginError::InvalidConfig` when the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, PluginError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PluginError::InvalidConfig(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Inserts a string value (builder-style, mainly for tests and the CLI).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Returns the raw string value for a key, if present.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the trimmed string value for a key.
    ///
    /// Whitespace-only values count as absent.
    pub fn get_trimmed(&self, key: &str) -> Option<&str> {
        self.get_str(key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Deserializes this configuration into a typed config struct.
    ///
    /// # Errors
    ///
    /// Returns `PluginError::InvalidConfig` when the shape does not match.
    pub fn typed<T: DeserializeOwned>(&self) -> Result<T, PluginError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| PluginError::InvalidConfig(e.to_string()))
    }

    /// Returns true if no keys are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for PluginConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = PluginConfig::from_value(Value::Array(vec![])).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_get_trimmed() {
        let config = PluginConfig::new()
            .with("authToken", "  tok-123  ")
            .with("blank", "   ");

        assert_eq!(config.get_trimmed("authToken"), Some("tok-123"));
        assert_eq!(config.get_trimmed("blank"), None);
        assert_eq!(config.get_trimmed("missing"), None);
    }

    #[test]
    fn test_typed_deserialization() {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct TestConfig {
            auth_token: Option<String>,
        }

        let config = PluginConfig::new().with("authToken", "tok");
        let typed: TestConfig = config.typed().unwrap();
        assert_eq!(typed.auth_token.as_deref(), Some("tok"));

        let empty: TestConfig = PluginConfig::new().typed().unwrap();
        assert!(empty.auth_token.is_none());
    }
}
