//! Layout catalog - enumerates layout templates available to a theme.
//!
//! Layouts live under `{templates_dir}/{theme}/layouts/` for the generic set
//! and `{templates_dir}/{theme}/{plugin}/layouts/` for a plugin's own set.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Source of layout template names.
pub trait LayoutCatalog: Send + Sync {
    /// Layout names of `theme`; the plugin's own set when `plugin` is given.
    fn layouts(&self, theme: &str, plugin: Option<&str>) -> Result<Vec<String>>;
}

/// Layout catalog reading template files from disk.
#[derive(Debug, Clone)]
pub struct FsLayoutCatalog {
    root: PathBuf,
}

impl FsLayoutCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn layout_dir(&self, theme: &str, plugin: Option<&str>) -> PathBuf {
        let mut dir = self.root.join(theme);
        if let Some(plugin) = plugin {
            dir.push(plugin);
        }
        dir.join("layouts")
    }
}

impl LayoutCatalog for FsLayoutCatalog {
    fn layouts(&self, theme: &str, plugin: Option<&str>) -> Result<Vec<String>> {
        let dir = self.layout_dir(theme, plugin);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "no layout directory");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("failed to read layout directory {}", dir.display()))?
        {
            let path = entry.context("failed to read layout entry")?.path();
            if let Some(name) = template_name(&path) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Name of an `.html` template file, without the extension.
fn template_name(path: &Path) -> Option<String> {
    if !path.is_file() || path.extension().is_none_or(|ext| ext != "html") {
        return None;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Layout catalog with fixed lists, independent of theme.
#[derive(Debug, Clone, Default)]
pub struct StaticLayoutCatalog {
    generic: Vec<String>,
    plugins: HashMap<String, Vec<String>>,
}

impl StaticLayoutCatalog {
    pub fn new(generic: &[&str]) -> Self {
        Self {
            generic: generic.iter().map(|s| s.to_string()).collect(),
            plugins: HashMap::new(),
        }
    }

    /// Add a plugin's own layouts.
    pub fn with_plugin(mut self, plugin: &str, layouts: &[&str]) -> Self {
        self.plugins.insert(
            plugin.to_string(),
            layouts.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

impl LayoutCatalog for StaticLayoutCatalog {
    fn layouts(&self, _theme: &str, plugin: Option<&str>) -> Result<Vec<String>> {
        Ok(match plugin {
            Some(plugin) => self.plugins.get(plugin).cloned().unwrap_or_default(),
            None => self.generic.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn lists_html_stems_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let layouts = dir.path().join("default").join("layouts");
        std::fs::create_dir_all(&layouts).unwrap();
        std::fs::write(layouts.join("wide.html"), "").unwrap();
        std::fs::write(layouts.join("default.html"), "").unwrap();
        std::fs::write(layouts.join("notes.txt"), "").unwrap();

        let catalog = FsLayoutCatalog::new(dir.path());
        assert_eq!(
            catalog.layouts("default", None).unwrap(),
            vec!["default", "wide"]
        );
    }

    #[test]
    fn plugin_layouts_come_from_plugin_directory() {
        let dir = tempfile::tempdir().unwrap();
        let layouts = dir.path().join("default").join("Blog").join("layouts");
        std::fs::create_dir_all(&layouts).unwrap();
        std::fs::write(layouts.join("blog.html"), "").unwrap();

        let catalog = FsLayoutCatalog::new(dir.path());
        assert_eq!(
            catalog.layouts("default", Some("Blog")).unwrap(),
            vec!["blog"]
        );
        assert!(catalog.layouts("default", None).unwrap().is_empty());
    }

    #[test]
    fn missing_theme_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FsLayoutCatalog::new(dir.path());
        assert!(catalog.layouts("nope", None).unwrap().is_empty());
    }

    #[test]
    fn static_catalog_separates_plugin_sets() {
        let catalog = StaticLayoutCatalog::new(&["default"]).with_plugin("Blog", &["blog"]);
        assert_eq!(catalog.layouts("any", None).unwrap(), vec!["default"]);
        assert_eq!(catalog.layouts("any", Some("Blog")).unwrap(), vec!["blog"]);
        assert!(catalog.layouts("any", Some("Mail")).unwrap().is_empty());
    }
}
