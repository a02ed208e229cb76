//! Application state shared across all handlers.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tera::Tera;
use tracing::{debug, info};

use crate::config::Config;
use crate::contents::{ContentServices, SettingsRegistry};
use crate::db;
use crate::repository::{PgContentRepository, PgUserRepository};
use crate::theme::FsLayoutCatalog;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool (None when running on other repositories).
    db: Option<PgPool>,

    /// Repositories, layout catalog, and content type settings.
    services: ContentServices,

    /// Templates of the active theme.
    tera: Tera,
}

impl AppState {
    /// Create application state backed by PostgreSQL.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config).await?;
        db::run_migrations(&pool).await?;

        let settings = SettingsRegistry::load(&config.contents_settings)
            .context("failed to load content type settings")?;

        let services = ContentServices {
            contents: Arc::new(PgContentRepository::new(
                pool.clone(),
                config.main_site_display_name.clone(),
            )),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            layouts: Arc::new(FsLayoutCatalog::new(&config.templates_dir)),
            settings: Arc::new(settings),
            theme: config.theme.clone(),
        };

        let tera = load_theme(&config.templates_dir.join(&config.theme))?;
        info!(theme = %config.theme, "theme loaded");

        Ok(Self::from_parts(Some(pool), services, tera))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(db: Option<PgPool>, services: ContentServices, tera: Tera) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, services, tera }),
        }
    }

    /// Get the database pool, if any.
    pub fn db(&self) -> Option<&PgPool> {
        self.inner.db.as_ref()
    }

    pub fn services(&self) -> &ContentServices {
        &self.inner.services
    }

    pub fn tera(&self) -> &Tera {
        &self.inner.tera
    }

    /// Check PostgreSQL connectivity.
    pub async fn postgres_healthy(&self) -> bool {
        match self.db() {
            Some(pool) => db::check_health(pool).await,
            None => false,
        }
    }
}

/// Load every template below a theme directory.
pub fn load_theme(theme_dir: &Path) -> Result<Tera> {
    if !theme_dir.is_dir() {
        debug!(dir = %theme_dir.display(), "theme directory missing, no templates loaded");
        return Ok(Tera::default());
    }

    let pattern = theme_dir.join("**/*.html");
    let pattern_str = pattern.to_str().context("invalid theme directory path")?;
    let tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

    debug!(count = tera.get_template_names().count(), "loaded templates");
    Ok(tera)
}
