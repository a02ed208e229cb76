//! PostgreSQL repositories.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::{
    Content, ContentRecord, ContentSummary, FOLDER_TYPE, MAIN_SITE_ID, RelatedContent, Site,
    UserSummary, folder_label, split_type,
};

use super::{ContentRepository, UserRepository};

const CONTENT_COLUMNS: &str = "id, site_id, type, plugin, entity_id, name, title, url, \
     description, layout_template, parent_id, site_root, alias_id, main_site_content_id, author_id";

/// Content repository backed by the `content` and `site` tables.
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
    main_site_display_name: String,
}

impl PgContentRepository {
    /// Create a repository. The main site has no row and takes its name from
    /// configuration.
    pub fn new(pool: PgPool, main_site_display_name: impl Into<String>) -> Self {
        Self {
            pool,
            main_site_display_name: main_site_display_name.into(),
        }
    }

    async fn find_site(&self, site_id: i64) -> Result<Option<Site>> {
        if site_id == MAIN_SITE_ID {
            return Ok(Some(Site::main(&self.main_site_display_name)));
        }

        let site = sqlx::query_as::<_, Site>(
            "SELECT id, name, display_name, alias, main_site_id, relate_main_site, theme \
             FROM site WHERE id = $1",
        )
        .bind(site_id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch site")?;

        Ok(site)
    }

    async fn with_site(&self, content: Option<Content>) -> Result<Option<ContentRecord>> {
        let Some(content) = content else {
            return Ok(None);
        };
        let site = self.find_site(content.site_id).await?;
        Ok(Some(ContentRecord { content, site }))
    }
}

impl std::fmt::Debug for PgContentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgContentRepository")
            .field("pool", &"PgPool")
            .field("main_site_display_name", &self.main_site_display_name)
            .finish()
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>> {
        let content = sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch content by id")?;

        self.with_site(content).await
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ContentRecord>> {
        debug!(url = %url, "looking up content by url");
        let content = sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE url = $1 ORDER BY id LIMIT 1"
        ))
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch content by url")?;

        self.with_site(content).await
    }

    async fn path(&self, id: i64) -> Result<Vec<ContentSummary>> {
        let path = sqlx::query_as::<_, ContentSummary>(
            r#"
            WITH RECURSIVE ancestors AS (
                -- Base case: the node itself
                SELECT id, parent_id, title, url, layout_template, site_root, 0 AS depth
                FROM content
                WHERE id = $1

                UNION ALL

                -- Recursive case: parent of the previous row
                SELECT c.id, c.parent_id, c.title, c.url, c.layout_template, c.site_root, a.depth + 1
                FROM content c
                INNER JOIN ancestors a ON c.id = a.parent_id
            )
            SELECT id, title, url, layout_template, site_root
            FROM ancestors
            ORDER BY depth DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .context("failed to fetch content path")?;

        Ok(path)
    }

    async fn find_by_type(
        &self,
        type_key: &str,
        entity_id: Option<i64>,
    ) -> Result<Option<Content>> {
        let (plugin, content_type) = split_type(type_key);

        let content = sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content \
             WHERE plugin = $1 AND type = $2 AND ($3::BIGINT IS NULL OR entity_id = $3) \
             ORDER BY id LIMIT 1"
        ))
        .bind(plugin)
        .bind(content_type)
        .bind(entity_id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch content by type")?;

        Ok(content)
    }

    async fn folder_list(
        &self,
        site_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<Vec<(i64, String)>> {
        #[derive(sqlx::FromRow)]
        struct FolderRow {
            id: i64,
            title: String,
            depth: i32,
        }

        let rows = sqlx::query_as::<_, FolderRow>(
            r#"
            WITH RECURSIVE tree AS (
                SELECT id, site_id, type, title, 0 AS depth, ARRAY[id] AS path
                FROM content
                WHERE parent_id IS NULL AND id IS DISTINCT FROM $2

                UNION ALL

                SELECT c.id, c.site_id, c.type, c.title, t.depth + 1, t.path || c.id
                FROM content c
                INNER JOIN tree t ON c.parent_id = t.id
                WHERE c.id IS DISTINCT FROM $2
            )
            SELECT id, title, depth
            FROM tree
            WHERE type = $3 AND site_id = $1
            ORDER BY path
            "#,
        )
        .bind(site_id)
        .bind(exclude_id)
        .bind(FOLDER_TYPE)
        .fetch_all(&self.pool)
        .await
        .context("failed to list content folders")?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let depth = usize::try_from(r.depth).unwrap_or_default();
                (r.id, folder_label(&r.title, depth))
            })
            .collect())
    }

    async fn site_list(&self) -> Result<Vec<(i64, String)>> {
        let sites: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, display_name FROM site ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .context("failed to list sites")?;

        let mut list = Vec::with_capacity(sites.len() + 1);
        list.push((MAIN_SITE_ID, self.main_site_display_name.clone()));
        list.extend(sites);
        Ok(list)
    }

    async fn related_contents(&self, id: i64) -> Result<Vec<RelatedContent>> {
        let main_id: Option<Option<i64>> =
            sqlx::query_scalar("SELECT main_site_content_id FROM content WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("failed to fetch main site content id")?;

        let Some(main_id) = main_id else {
            return Ok(Vec::new());
        };
        let main_id = main_id.unwrap_or(id);

        let related = sqlx::query_as::<_, RelatedContent>(
            r#"
            SELECT c.id, c.title, c.url, c.site_id,
                   COALESCE(s.display_name, $3) AS site_display_name
            FROM content c
            LEFT JOIN site s ON s.id = c.site_id
            WHERE c.id <> $1 AND (c.id = $2 OR c.main_site_content_id = $2)
            ORDER BY c.site_id, c.id
            "#,
        )
        .bind(id)
        .bind(main_id)
        .bind(&self.main_site_display_name)
        .fetch_all(&self.pool)
        .await
        .context("failed to fetch related contents")?;

        Ok(related)
    }
}

/// User repository backed by the `users` table.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn user_list(&self) -> Result<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name FROM users WHERE status = 1 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list users")?;

        Ok(users)
    }
}
