//! Content page handler.
//!
//! Renders whatever [`attach_content`](crate::middleware::attach_content)
//! resolved for the request, wrapped in the page's layout template.

use anyhow::Context;
use axum::response::Html;
use axum::{Extension, Router, extract::State};
use tera::Tera;

use crate::error::{AppError, AppResult};
use crate::middleware::ResolvedPage;
use crate::state::AppState;

/// Layout used when a page resolves to none.
const DEFAULT_LAYOUT: &str = "default";

/// Create the content page router. Every unmatched path is a content page.
pub fn router() -> Router<AppState> {
    Router::new().fallback(content_page)
}

async fn content_page(
    State(state): State<AppState>,
    page: Option<Extension<ResolvedPage>>,
) -> AppResult<Html<String>> {
    let Some(Extension(page)) = page else {
        return Err(AppError::NotFound);
    };

    Ok(Html(render_page(state.tera(), &page)?))
}

/// Render a page with its layout, or bare markup when the theme lacks it.
pub fn render_page(tera: &Tera, page: &ResolvedPage) -> AppResult<String> {
    let Some(template) = layout_template_name(tera, page.layout.as_deref()) else {
        return Ok(fallback_markup(page));
    };

    let mut context = tera::Context::new();
    context.insert("content", &page.content);
    context.insert("site", &page.site);
    context.insert("crumbs", &page.crumbs);
    context.insert("title", &page.title);
    context.insert("description", &page.description);

    let html = tera
        .render(&template, &context)
        .with_context(|| format!("failed to render layout {template}"))?;
    Ok(html)
}

/// Template file of a layout, falling back to the default layout.
fn layout_template_name(tera: &Tera, layout: Option<&str>) -> Option<String> {
    let exists = |name: &str| tera.get_template_names().any(|t| t == name);

    layout
        .map(|l| format!("layouts/{l}.html"))
        .filter(|name| exists(name))
        .or_else(|| Some(format!("layouts/{DEFAULT_LAYOUT}.html")).filter(|name| exists(name)))
}

fn fallback_markup(page: &ResolvedPage) -> String {
    let crumbs: String = page
        .crumbs
        .iter()
        .map(|c| {
            format!(
                "<a href=\"{}\">{}</a> &rsaquo; ",
                html_escape(&c.url),
                html_escape(&c.name)
            )
        })
        .collect();

    format!(
        "<html><head><title>{title}</title><meta name=\"description\" content=\"{description}\"></head>\
         <body><nav class=\"crumbs\">{crumbs}</nav><h1>{title}</h1></body></html>",
        title = html_escape(&page.title),
        description = html_escape(&page.description),
    )
}

/// HTML-escape a string for safe output.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
