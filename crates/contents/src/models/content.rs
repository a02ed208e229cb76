//! Content tree records.
//!
//! Every page, folder, and alias in the CMS is a `content` row. Rows form a
//! tree through `parent_id`; the node with [`ROOT_CONTENT_ID`] is the root of
//! the main site, and each sub-site hangs off a node flagged `site_root`.

use serde::{Deserialize, Serialize};

use super::site::Site;

/// ID of the root node of the content tree.
pub const ROOT_CONTENT_ID: i64 = 1;

/// Type tag of folder nodes.
pub const FOLDER_TYPE: &str = "ContentFolder";

/// Plugin that owns content types declared without a plugin prefix.
const CORE_PLUGIN: &str = "Core";

/// A content node.
///
/// Submitted edit and preview data deserializes into this type as well, so
/// every field has a default: an unsaved node has no `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Content {
    pub id: Option<i64>,

    /// Owning site (0 is the main site).
    pub site_id: i64,

    /// Type tag, e.g. "ContentFolder" or "BlogContent".
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub content_type: String,

    /// Plugin that provides the type.
    pub plugin: String,

    /// Row ID of the entity backing this node in the plugin's own table.
    pub entity_id: Option<i64>,

    /// URL slug of this node (may arrive URL-encoded from forms).
    pub name: String,

    pub title: String,

    /// Full URL of this node.
    pub url: String,

    pub description: Option<String>,

    /// Layout template declared on this node; empty or `None` inherits.
    pub layout_template: Option<String>,

    pub parent_id: Option<i64>,

    /// Whether this node is the root folder of a site.
    pub site_root: bool,

    /// Target node when this node is an alias.
    pub alias_id: Option<i64>,

    /// Counterpart node in the main site for related sub-site content.
    pub main_site_content_id: Option<i64>,

    pub author_id: Option<i64>,
}

impl Content {
    /// The layout template declared on this node, if it is non-empty.
    pub fn own_layout_template(&self) -> Option<&str> {
        self.layout_template.as_deref().filter(|t| !t.is_empty())
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.content_type == FOLDER_TYPE
    }

    /// Check if this node is the root of the content tree.
    pub fn is_root(&self) -> bool {
        self.id == Some(ROOT_CONTENT_ID)
    }

    /// Check if this node is an alias of another node.
    pub fn is_alias(&self) -> bool {
        self.alias_id.is_some()
    }
}

/// A content node together with its owning site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub content: Content,
    pub site: Option<Site>,
}

/// One entry of an ancestor path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentSummary {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub layout_template: Option<String>,
    pub site_root: bool,
}

impl From<&Content> for ContentSummary {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id.unwrap_or_default(),
            title: content.title.clone(),
            url: content.url.clone(),
            layout_template: content.layout_template.clone(),
            site_root: content.site_root,
        }
    }
}

/// Content in another site linked to the same main-site node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RelatedContent {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub site_id: i64,
    pub site_display_name: String,
}

/// Split a configured type key into `(plugin, type)`.
///
/// `"Blog.BlogContent"` belongs to the `Blog` plugin; a bare
/// `"ContentFolder"` belongs to core.
pub fn split_type(type_key: &str) -> (&str, &str) {
    match type_key.split_once('.') {
        Some((plugin, content_type)) => (plugin, content_type),
        None => (CORE_PLUGIN, type_key),
    }
}

/// Label for a folder in a parent-folder select list, indented by depth.
pub fn folder_label(title: &str, depth: usize) -> String {
    if depth == 0 {
        title.to_string()
    } else {
        format!("{}└{title}", "\u{3000}".repeat(depth - 1))
    }
}
