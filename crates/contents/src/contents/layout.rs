//! Layout template inheritance.

use anyhow::Result;

use crate::models::ContentSummary;
use crate::repository::ContentRepository;

/// The layout template a node inherits from its ancestors.
///
/// `path` is root first and ends with the node itself, which is skipped; the
/// nearest ancestor declaring a non-empty template wins. `None` when no
/// ancestor declares one.
pub fn inherited_layout(path: &[ContentSummary]) -> Option<String> {
    path.split_last()
        .and_then(|(_, ancestors)| nearest_layout(ancestors))
}

/// The non-empty layout template nearest the end of a root-first path.
pub fn nearest_layout(path: &[ContentSummary]) -> Option<String> {
    path.iter()
        .rev()
        .find_map(|c| c.layout_template.as_deref().filter(|t| !t.is_empty()))
        .map(str::to_string)
}

/// Layout template inherited by the node `id`. `None` without an id.
pub async fn parent_layout_template(
    contents: &dyn ContentRepository,
    id: Option<i64>,
) -> Result<Option<String>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let path = contents.path(id).await?;
    Ok(inherited_layout(&path))
}

/// Layout template a new child of `parent_id` would inherit.
pub async fn layout_under(
    contents: &dyn ContentRepository,
    parent_id: Option<i64>,
) -> Result<Option<String>> {
    let Some(parent_id) = parent_id else {
        return Ok(None);
    };
    let path = contents.path(parent_id).await?;
    Ok(nearest_layout(&path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, layout_template: Option<&str>) -> ContentSummary {
        ContentSummary {
            id,
            title: format!("node {id}"),
            url: format!("/{id}"),
            layout_template: layout_template.map(str::to_string),
            site_root: false,
        }
    }

    #[test]
    fn nearest_ancestor_wins() {
        let path = vec![
            summary(1, Some("default")),
            summary(2, Some("wide")),
            summary(3, None),
        ];
        assert_eq!(inherited_layout(&path).as_deref(), Some("wide"));
    }

    #[test]
    fn empty_templates_are_skipped() {
        let path = vec![
            summary(1, Some("default")),
            summary(2, Some("")),
            summary(3, None),
        ];
        assert_eq!(inherited_layout(&path).as_deref(), Some("default"));
    }

    #[test]
    fn own_template_is_ignored() {
        let path = vec![summary(1, None), summary(2, Some("own"))];
        assert_eq!(inherited_layout(&path), None);
    }

    #[test]
    fn no_template_anywhere_is_none() {
        let path = vec![summary(1, Some("")), summary(2, None), summary(3, None)];
        assert_eq!(inherited_layout(&path), None);
    }

    #[test]
    fn nearest_layout_includes_last_entry() {
        let path = vec![summary(1, Some("default")), summary(2, Some("wide"))];
        assert_eq!(nearest_layout(&path).as_deref(), Some("wide"));
        assert_eq!(inherited_layout(&path).as_deref(), Some("default"));
    }

    #[test]
    fn root_alone_is_none() {
        assert_eq!(inherited_layout(&[summary(1, Some("default"))]), None);
        assert_eq!(inherited_layout(&[]), None);
    }
}
