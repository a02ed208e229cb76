//! HTTP route handlers.

pub mod health;
pub mod page;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::attach_content;
use crate::state::AppState;

/// Build the application router. Content resolution runs before every route.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(page::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            attach_content,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
