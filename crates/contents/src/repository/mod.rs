//! Repository traits over the content tree.
//!
//! The component only talks to these traits; [`PgContentRepository`] backs
//! them with PostgreSQL and [`MemoryStore`] keeps everything in memory.

mod memory;
mod pg;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Content, ContentRecord, ContentSummary, RelatedContent, UserSummary};

pub use memory::MemoryStore;
pub use pg::{PgContentRepository, PgUserRepository};

/// Read access to content nodes and their sites.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Find a node and its owning site by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>>;

    /// Find a node and its owning site by exact URL.
    async fn find_by_url(&self, url: &str) -> Result<Option<ContentRecord>>;

    /// Ancestor path of a node, root first, ending with the node itself.
    ///
    /// Empty when the node does not exist.
    async fn path(&self, id: i64) -> Result<Vec<ContentSummary>>;

    /// Find the node of a configured type (`"Plugin.Type"` or `"Type"`),
    /// optionally for a specific entity.
    async fn find_by_type(
        &self,
        type_key: &str,
        entity_id: Option<i64>,
    ) -> Result<Option<Content>>;

    /// Folders of a site as `(id, indented title)` in tree order.
    ///
    /// `exclude_id` removes that folder and everything below it.
    async fn folder_list(&self, site_id: i64, exclude_id: Option<i64>)
    -> Result<Vec<(i64, String)>>;

    /// All sites as `(id, display name)`, main site first.
    async fn site_list(&self) -> Result<Vec<(i64, String)>>;

    /// Nodes in other sites linked to the same main-site node as `id`.
    async fn related_contents(&self, id: i64) -> Result<Vec<RelatedContent>>;
}

/// Read access to users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users selectable as authors.
    async fn user_list(&self) -> Result<Vec<UserSummary>>;
}
