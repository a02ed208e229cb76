//! Content resolution middleware.
//!
//! Resolves the content node addressed by a front-end request and attaches
//! the resulting page settings to the request extensions, where handlers pick
//! them up as `Extension<ResolvedPage>`.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Query, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::contents::{
    ComponentOptions, ContentRequest, ContentsComponent, ControllerInfo, Crumb, Surface, ViewState,
};
use crate::error::AppError;
use crate::models::{Content, Site};
use crate::state::AppState;

/// A content page ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPage {
    pub content: Content,
    pub site: Option<Site>,
    pub layout: Option<String>,
    pub crumbs: Vec<Crumb>,
    pub title: String,
    pub description: String,
}

/// Middleware attaching the content addressed by the request path.
///
/// Only the path and query string are read. A `preview` query parameter
/// records the preview mode, but the request body is left to the handler, so
/// submitted preview data never replaces the stored content here; admin
/// handlers drive that through [`ContentsComponent`] directly.
///
/// A repository failure answers 500 instead of falling through to the page
/// handler as a missing page.
///
/// System paths are skipped:
/// - /admin/* - Admin interface
/// - /static/* - Static files
/// - /health - Health check
pub async fn attach_content(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_system_path(&path) {
        return next.run(request).await;
    }

    let query = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .map(|Query(q)| q)
        .unwrap_or_default();

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut content_request = ContentRequest::new(&path).requested(&segments);
    content_request.query = query;

    let controller = ControllerInfo::new("Contents", "Content", "view", Surface::Front);
    let mut view = ViewState::new();

    match ContentsComponent::initialize(
        state.services().clone(),
        controller,
        ComponentOptions::default(),
        &mut content_request,
        &mut view,
    )
    .await
    {
        Ok(_) => {
            if let Some(content) = content_request.content {
                let description = content.description.clone().unwrap_or_default();
                let page = ResolvedPage {
                    title: view.page_title.unwrap_or_else(|| content.title.clone()),
                    content,
                    site: content_request.site,
                    layout: view.layout,
                    crumbs: view.crumbs,
                    description,
                };
                request.extensions_mut().insert(page);
            }
        }
        Err(e) => {
            let e = e.context(format!("failed to resolve content at {path}"));
            return AppError::Internal(e).into_response();
        }
    }

    next.run(request).await
}

fn is_system_path(path: &str) -> bool {
    path.starts_with("/admin") || path.starts_with("/static") || path == "/health"
}
