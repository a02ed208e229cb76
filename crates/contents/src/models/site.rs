//! Site model.
//!
//! The main site has no row of its own; it is represented by
//! [`MAIN_SITE_ID`] and a display name from configuration.

use serde::{Deserialize, Serialize};

/// ID of the main site.
pub const MAIN_SITE_ID: i64 = 0;

/// Site record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Site {
    pub id: i64,

    /// Machine name.
    pub name: String,

    /// Human-readable name.
    pub display_name: String,

    /// URL prefix of the site.
    pub alias: Option<String>,

    /// Site this one mirrors, if any.
    pub main_site_id: Option<i64>,

    /// Whether content of this site is linked to main-site content.
    pub relate_main_site: bool,

    /// Theme override.
    pub theme: Option<String>,
}

impl Site {
    /// The main site, named by configuration.
    pub fn main(display_name: &str) -> Self {
        Self {
            id: MAIN_SITE_ID,
            display_name: display_name.to_string(),
            ..Default::default()
        }
    }
}
