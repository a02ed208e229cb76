//! Request and view state the component reads and shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Content, Site};

/// Side of the application a controller serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Front,
    Admin,
}

/// Identity of the controller handling the request.
#[derive(Debug, Clone)]
pub struct ControllerInfo {
    /// Controller name, e.g. "ContentFolders".
    pub name: String,
    /// Plugin owning the controller, if any.
    pub plugin: Option<String>,
    /// Primary model of the controller, e.g. "ContentFolder".
    pub model_class: String,
    /// Action being dispatched, e.g. "edit".
    pub action: String,
    pub surface: Surface,
}

impl ControllerInfo {
    /// A core (non-plugin) controller.
    pub fn new(name: &str, model_class: &str, action: &str, surface: Surface) -> Self {
        Self {
            name: name.to_string(),
            plugin: None,
            model_class: model_class.to_string(),
            action: action.to_string(),
            surface,
        }
    }

    /// Set the owning plugin.
    pub fn with_plugin(mut self, plugin: &str) -> Self {
        self.plugin = Some(plugin.to_string());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.surface == Surface::Admin
    }
}

/// Request validation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityChecks {
    /// Validate posted form structure.
    pub validate_post: bool,
    /// Require a CSRF token.
    pub csrf_check: bool,
}

impl Default for SecurityChecks {
    fn default() -> Self {
        Self {
            validate_post: true,
            csrf_check: true,
        }
    }
}

/// Submitted form data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentData {
    pub content: Option<Content>,
    pub site: Option<Site>,
}

/// The request as seen by the component.
#[derive(Debug, Clone, Default)]
pub struct ContentRequest {
    /// Request URL without the leading slash.
    pub url: String,
    /// Path segments captured by the router.
    pub path: Vec<String>,
    /// Whether the request was dispatched to render a content node.
    pub requested: bool,
    pub query: HashMap<String, String>,
    /// Working copy of the submitted data.
    pub data: ContentData,
    /// Content attached to the request.
    pub content: Option<Content>,
    /// Site owning the attached content.
    pub site: Option<Site>,
    pub security: SecurityChecks,
}

impl ContentRequest {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_start_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Mark the request as a content dispatch with the given path segments.
    pub fn requested(mut self, path: &[&str]) -> Self {
        self.requested = true;
        self.path = path.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    /// Set submitted content data.
    pub fn with_content_data(mut self, content: Content) -> Self {
        self.data.content = Some(content);
        self
    }

    /// The preview mode requested through the query string, if any.
    pub fn preview(&self) -> Option<&str> {
        self.query
            .get("preview")
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }

    /// URL of the content this request addresses.
    ///
    /// Built from the path segments, or from the raw URL when there are none.
    /// Folder URLs end in `/`, so a trailing slash on the raw URL is kept.
    pub fn content_url(&self) -> String {
        if self.path.is_empty() {
            return format!("/{}", self.url);
        }
        let mut url = format!("/{}", self.path.join("/"));
        if self.url.ends_with('/') {
            url.push('/');
        }
        url
    }
}

/// A breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub name: String,
    pub url: String,
}

impl Crumb {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// What the controller hands to the renderer.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Layout template to wrap the page in.
    pub layout: Option<String>,
    pub crumbs: Vec<Crumb>,
    /// Admin sub-menu elements.
    pub sub_menu_elements: Vec<String>,
    pub page_title: Option<String>,
    /// Template variables.
    pub view: tera::Context,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a template variable.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.view.insert(key, value);
    }

    /// Get a template variable.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.view.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_url_prefers_path_segments() {
        let request = ContentRequest::new("/ignored").requested(&["news", "2024"]);
        assert_eq!(request.content_url(), "/news/2024");
    }

    #[test]
    fn content_url_keeps_trailing_slash() {
        let request = ContentRequest::new("/blog/").requested(&["blog"]);
        assert_eq!(request.content_url(), "/blog/");

        let request = ContentRequest::new("/m/news").requested(&["m", "news"]);
        assert_eq!(request.content_url(), "/m/news");
    }

    #[test]
    fn content_url_falls_back_to_raw_url() {
        let request = ContentRequest::new("/about/company");
        assert_eq!(request.content_url(), "/about/company");
    }

    #[test]
    fn empty_preview_is_no_preview() {
        let request = ContentRequest::new("/").with_query("preview", "");
        assert_eq!(request.preview(), None);

        let request = ContentRequest::new("/").with_query("preview", "default");
        assert_eq!(request.preview(), Some("default"));
    }

    #[test]
    fn security_checks_on_by_default() {
        let request = ContentRequest::default();
        assert!(request.security.validate_post);
        assert!(request.security.csrf_check);
    }

    #[test]
    fn view_state_variables() {
        let mut state = ViewState::new();
        assert!(state.get("description").is_none());
        state.set("description", "About us");
        assert_eq!(
            state.get("description"),
            Some(&serde_json::Value::String("About us".to_string()))
        );
    }
}
