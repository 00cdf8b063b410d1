//! Configuration items advertised by plugins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single configurable setting exposed by a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    key: String,
    description: String,
    default_value: Value,
}

impl ConfigItem {
    /// Creates an item with its default value.
    #[must_use]
    pub fn new(key: impl Into<String>, description: impl Into<String>, default_value: Value) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            default_value,
        }
    }

    /// Setting key, unique within the plugin.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Human-readable description of the setting.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Value used when the host supplies none.
    #[must_use]
    pub const fn default_value(&self) -> &Value {
        &self.default_value
    }
}

/// Configuration items a plugin exposes to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginConfig {
    items: Vec<ConfigItem>,
}

impl PluginConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, replacing any existing item with the same key.
    #[must_use]
    pub fn with_item(mut self, item: ConfigItem) -> Self {
        self.items.retain(|existing| existing.key != item.key);
        self.items.push(item);
        self
    }

    /// Looks up an item by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// All advertised items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ConfigItem] {
        &self.items
    }

    /// Returns `true` when the plugin exposes no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
