//! Trovato Contents
//!
//! Content tree request handling: resolves the content addressed by a
//! request, builds breadcrumbs, inherits layout templates from ancestors, and
//! stages the admin content form. The `trovato-contents` binary serves
//! content pages with it.

pub mod config;
pub mod contents;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod theme;

pub use config::Config;
pub use state::AppState;
