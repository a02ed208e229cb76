//! In-memory repository for tests and local development.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    Content, ContentRecord, ContentSummary, MAIN_SITE_ID, RelatedContent, Site, UserSummary,
    folder_label, split_type,
};

use super::{ContentRepository, UserRepository};

/// Content, sites, and users held in memory.
///
/// Nodes are kept in insertion order, which doubles as sibling order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Vec<Content>,
    sites: Vec<Site>,
    users: Vec<UserSummary>,
    main_site_display_name: String,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new(main_site_display_name: impl Into<String>) -> Self {
        Self {
            main_site_display_name: main_site_display_name.into(),
            ..Default::default()
        }
    }

    /// Add a content node.
    pub fn with_content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    /// Add a site.
    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    /// Add a user.
    pub fn with_user(mut self, id: i64, name: &str) -> Self {
        self.users.push(UserSummary {
            id,
            name: name.to_string(),
        });
        self
    }

    fn content(&self, id: i64) -> Option<&Content> {
        self.contents.iter().find(|c| c.id == Some(id))
    }

    fn site(&self, site_id: i64) -> Option<Site> {
        if site_id == MAIN_SITE_ID {
            return Some(Site::main(&self.main_site_display_name));
        }
        self.sites.iter().find(|s| s.id == site_id).cloned()
    }

    fn record(&self, content: &Content) -> ContentRecord {
        ContentRecord {
            content: content.clone(),
            site: self.site(content.site_id),
        }
    }

    fn children(&self, parent_id: Option<i64>) -> impl Iterator<Item = &Content> {
        self.contents.iter().filter(move |c| c.parent_id == parent_id)
    }

    /// Depth-first walk collecting `(node, depth)` in tree order.
    fn walk<'a>(
        &'a self,
        parent_id: Option<i64>,
        depth: usize,
        exclude_id: Option<i64>,
        visited: &mut HashSet<i64>,
        out: &mut Vec<(&'a Content, usize)>,
    ) {
        for child in self.children(parent_id) {
            let Some(id) = child.id else { continue };
            if Some(id) == exclude_id || !visited.insert(id) {
                continue;
            }
            out.push((child, depth));
            self.walk(Some(id), depth + 1, exclude_id, visited, out);
        }
    }
}

#[async_trait]
impl ContentRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>> {
        Ok(self.content(id).map(|c| self.record(c)))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ContentRecord>> {
        Ok(self
            .contents
            .iter()
            .find(|c| c.url == url)
            .map(|c| self.record(c)))
    }

    async fn path(&self, id: i64) -> Result<Vec<ContentSummary>> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.content(id);

        while let Some(content) = current {
            let Some(content_id) = content.id else { break };
            if !seen.insert(content_id) {
                break;
            }
            path.push(ContentSummary::from(content));
            current = content.parent_id.and_then(|p| self.content(p));
        }

        path.reverse();
        Ok(path)
    }

    async fn find_by_type(
        &self,
        type_key: &str,
        entity_id: Option<i64>,
    ) -> Result<Option<Content>> {
        let (plugin, content_type) = split_type(type_key);
        Ok(self
            .contents
            .iter()
            .find(|c| {
                c.plugin == plugin
                    && c.content_type == content_type
                    && entity_id.is_none_or(|e| c.entity_id == Some(e))
            })
            .cloned())
    }

    async fn folder_list(
        &self,
        site_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<Vec<(i64, String)>> {
        let mut nodes = Vec::new();
        self.walk(None, 0, exclude_id, &mut HashSet::new(), &mut nodes);

        Ok(nodes
            .into_iter()
            .filter(|(c, _)| c.is_folder() && c.site_id == site_id)
            .filter_map(|(c, depth)| c.id.map(|id| (id, folder_label(&c.title, depth))))
            .collect())
    }

    async fn site_list(&self) -> Result<Vec<(i64, String)>> {
        let mut list = vec![(MAIN_SITE_ID, self.main_site_display_name.clone())];
        list.extend(self.sites.iter().map(|s| (s.id, s.display_name.clone())));
        Ok(list)
    }

    async fn related_contents(&self, id: i64) -> Result<Vec<RelatedContent>> {
        let Some(current) = self.content(id) else {
            return Ok(Vec::new());
        };
        let main_id = current.main_site_content_id.unwrap_or(id);

        Ok(self
            .contents
            .iter()
            .filter(|c| c.id != Some(id))
            .filter(|c| c.id == Some(main_id) || c.main_site_content_id == Some(main_id))
            .filter_map(|c| {
                Some(RelatedContent {
                    id: c.id?,
                    title: c.title.clone(),
                    url: c.url.clone(),
                    site_id: c.site_id,
                    site_display_name: self
                        .site(c.site_id)
                        .map(|s| s.display_name)
                        .unwrap_or_default(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn user_list(&self) -> Result<Vec<UserSummary>> {
        Ok(self.users.clone())
    }
}
