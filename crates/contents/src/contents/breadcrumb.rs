//! Breadcrumb trails from ancestor paths.

use crate::models::{Content, ContentSummary};

use super::request::Crumb;

/// Build breadcrumbs from a root-first ancestor path ending with the node.
///
/// The node itself and site roots are left out. When previewing, the final
/// crumb shows the previewed node instead, since an unsaved node cannot come
/// back from the path query; with no crumb to replace it is appended.
pub fn build_crumbs(path: &[ContentSummary], preview: Option<&Content>) -> Vec<Crumb> {
    let ancestors = path.split_last().map(|(_, rest)| rest).unwrap_or_default();

    let mut crumbs: Vec<Crumb> = ancestors
        .iter()
        .filter(|c| !c.site_root)
        .map(|c| Crumb::new(&c.title, &c.url))
        .collect();

    if let Some(previewed) = preview {
        let crumb = Crumb::new(&previewed.title, &previewed.url);
        match crumbs.last_mut() {
            Some(last) => *last = crumb,
            None => crumbs.push(crumb),
        }
    }

    crumbs
}
