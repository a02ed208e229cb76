#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test fixtures.
//!
//! Every test runs against the same small content tree held in a
//! [`MemoryStore`]:
//!
//! ```text
//! 1  Home (/, site root, layout "default")
//! ├─ 3  News (/news)
//! │  ├─ 5  Story (/news/story)
//! │  └─ 6  Events (/news/events, layout "wide")
//! │     └─ 7  Launch (/news/events/launch)
//! ├─ 10 Mobile (/m/, site root of site 1)
//! │  ├─ 11 News (/m/news, linked to 3)
//! │  └─ 12 Story alias (/m/news/story, alias of 5, linked to 5)
//! └─ 20 Blog (/blog/, Blog plugin, entity 1)
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tera::Tera;
use tower::ServiceExt;
use trovato_contents::AppState;
use trovato_contents::contents::{ContentServices, SettingsRegistry};
use trovato_contents::models::{Content, Site};
use trovato_contents::repository::MemoryStore;
use trovato_contents::routes;
use trovato_contents::theme::StaticLayoutCatalog;

pub const SETTINGS: &str = r#"
[items.Core.ContentFolder]
title = "Folder"
multiple = true

[items.Core.Page]
title = "Page"
preview = true

[items.Blog.BlogContent]
title = "Blog"
"#;

/// Build a content node.
pub fn node(id: i64, parent_id: Option<i64>, content_type: &str, title: &str, url: &str) -> Content {
    Content {
        id: Some(id),
        parent_id,
        content_type: content_type.to_string(),
        plugin: "Core".to_string(),
        name: title.to_lowercase(),
        title: title.to_string(),
        url: url.to_string(),
        description: Some(format!("About {title}")),
        ..Default::default()
    }
}

/// The fixture tree.
pub fn fixture_store() -> MemoryStore {
    let home = Content {
        site_root: true,
        layout_template: Some("default".to_string()),
        ..node(1, None, "ContentFolder", "Home", "/")
    };
    let events = Content {
        layout_template: Some("wide".to_string()),
        ..node(6, Some(3), "ContentFolder", "Events", "/news/events")
    };
    let mobile = Content {
        site_id: 1,
        site_root: true,
        ..node(10, Some(1), "ContentFolder", "Mobile", "/m/")
    };
    let mobile_news = Content {
        site_id: 1,
        main_site_content_id: Some(3),
        ..node(11, Some(10), "ContentFolder", "News", "/m/news")
    };
    let mobile_story = Content {
        site_id: 1,
        alias_id: Some(5),
        main_site_content_id: Some(5),
        ..node(12, Some(11), "ContentAlias", "Story", "/m/news/story")
    };
    let blog = Content {
        plugin: "Blog".to_string(),
        entity_id: Some(1),
        ..node(20, Some(1), "BlogContent", "Blog", "/blog/")
    };

    MemoryStore::new("Main site")
        .with_content(home)
        .with_content(node(3, Some(1), "ContentFolder", "News", "/news"))
        .with_content(node(5, Some(3), "Page", "Story", "/news/story"))
        .with_content(events)
        .with_content(node(7, Some(6), "Page", "Launch", "/news/events/launch"))
        .with_content(mobile)
        .with_content(mobile_news)
        .with_content(mobile_story)
        .with_content(blog)
        .with_site(Site {
            id: 1,
            name: "mobile".to_string(),
            display_name: "Mobile".to_string(),
            alias: Some("m".to_string()),
            main_site_id: Some(0),
            relate_main_site: true,
            theme: None,
        })
        .with_user(1, "admin")
        .with_user(2, "editor")
}

/// Services over the fixture tree.
pub fn services() -> ContentServices {
    services_with(fixture_store())
}

/// Services over a given store.
pub fn services_with(store: MemoryStore) -> ContentServices {
    let store = Arc::new(store);
    ContentServices {
        contents: store.clone(),
        users: store,
        layouts: Arc::new(
            StaticLayoutCatalog::new(&["default", "wide"]).with_plugin("Blog", &["blog", "default"]),
        ),
        settings: Arc::new(SettingsRegistry::from_toml(SETTINGS).unwrap()),
        theme: "default".to_string(),
    }
}

/// Layouts of the test theme.
pub const DEFAULT_LAYOUT: &str = r#"<title>{{ title }}</title>
<p class="description">{{ description }}</p>
<nav>{% for crumb in crumbs %}<a href="{{ crumb.url }}">{{ crumb.name }}</a>{% endfor %}</nav>"#;
pub const WIDE_LAYOUT: &str = "<main class=\"wide\">{{ title }}</main>";

/// The application router over the fixture tree, without a database.
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_services(services())
    }

    /// The application router over the given services.
    pub fn with_services(services: ContentServices) -> Self {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layouts/default.html", DEFAULT_LAYOUT),
            ("layouts/wide.html", WIDE_LAYOUT),
        ])
        .expect("Failed to add test layouts");

        let state = AppState::from_parts(None, services, tera);
        Self {
            router: routes::app(state),
        }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.request(request).await
    }
}
