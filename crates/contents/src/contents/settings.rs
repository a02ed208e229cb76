//! Settings registry - per-type configuration of the content form.
//!
//! Types are declared in static configuration grouped by plugin:
//!
//! ```toml
//! [items.Core.ContentFolder]
//! title = "Folder"
//! multiple = true
//! ```
//!
//! The registry flattens that into a map keyed by type, stamping each entry
//! with its plugin and type key.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Form configuration of one content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSetting {
    /// Display title of the type.
    pub title: String,
    /// Plugin declaring the type (filled in by the registry).
    #[serde(default)]
    pub plugin: String,
    /// Type key (filled in by the registry).
    #[serde(default, rename = "type")]
    pub content_type: String,
    /// Whether more than one node of this type may exist.
    #[serde(default)]
    pub multiple: bool,
    /// Whether the type supports preview.
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub icon: Option<String>,
    /// Admin routes by action name (e.g. "add", "edit").
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    items: BTreeMap<String, BTreeMap<String, ContentTypeSetting>>,
}

/// Registry of content type settings, keyed by type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SettingsRegistry {
    items: BTreeMap<String, ContentTypeSetting>,
}

impl SettingsRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from settings grouped by plugin.
    ///
    /// A type declared by two plugins keeps the later plugin's entry.
    pub fn from_plugin_items(
        items: BTreeMap<String, BTreeMap<String, ContentTypeSetting>>,
    ) -> Self {
        let mut registry = Self::new();
        for (plugin, settings) in items {
            for (content_type, mut setting) in settings {
                setting.plugin = plugin.clone();
                setting.content_type = content_type;
                registry.register(setting);
            }
        }
        registry
    }

    /// Parse a registry from TOML.
    pub fn from_toml(source: &str) -> Result<Self> {
        let file: SettingsFile =
            toml::from_str(source).context("failed to parse content settings")?;
        Ok(Self::from_plugin_items(file.items))
    }

    /// Load a registry from a TOML file. A missing file gives an empty registry.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "content settings file not found, no types registered");
            return Ok(Self::new());
        }

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let registry = Self::from_toml(&source)?;
        info!(count = registry.len(), "content type settings loaded");
        Ok(registry)
    }

    /// Register a setting under its type key.
    pub fn register(&mut self, setting: ContentTypeSetting) {
        if let Some(previous) = self.items.get(&setting.content_type) {
            warn!(
                content_type = %setting.content_type,
                previous = %previous.plugin,
                plugin = %setting.plugin,
                "content type declared twice, keeping the later declaration"
            );
        }
        self.items.insert(setting.content_type.clone(), setting);
    }

    /// Get the setting for a type.
    pub fn get(&self, content_type: &str) -> Option<&ContentTypeSetting> {
        self.items.get(content_type)
    }

    /// All settings keyed by type.
    pub fn items(&self) -> &BTreeMap<String, ContentTypeSetting> {
        &self.items
    }

    /// Type keys mapped to display titles.
    pub fn types(&self) -> BTreeMap<String, String> {
        self.items
            .iter()
            .map(|(key, setting)| (key.clone(), setting.title.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
