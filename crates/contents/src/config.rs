//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Path to the content type settings file (default: config/contents.toml).
    pub contents_settings: PathBuf,

    /// Root of the theme directories (default: ./themes).
    pub templates_dir: PathBuf,

    /// Active theme (default: "default").
    pub theme: String,

    /// Display name of the main site (default: "Main site").
    pub main_site_display_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let contents_settings = env::var("CONTENTS_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/contents.toml"));

        let templates_dir = env::var("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./themes"));

        let theme = env::var("THEME").unwrap_or_else(|_| "default".to_string());

        let main_site_display_name =
            env::var("MAIN_SITE_DISPLAY_NAME").unwrap_or_else(|_| "Main site".to_string());

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            contents_settings,
            templates_dir,
            theme,
            main_site_display_name,
        })
    }
}
