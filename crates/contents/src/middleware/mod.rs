//! HTTP middleware.

mod content;

pub use content::{ResolvedPage, attach_content};
