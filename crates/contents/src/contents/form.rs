//! Admin content form - choices and initial values for the edit view.

use anyhow::Result;
use tracing::debug;

use crate::models::{Content, MAIN_SITE_ID, Site};

use super::component::ContentServices;
use super::layout::{layout_under, parent_layout_template};
use super::request::{ContentRequest, ControllerInfo, ViewState};

/// Controller editing folders; a folder cannot become its own parent.
const FOLDER_CONTROLLER: &str = "ContentFolders";

/// Label of the choice that inherits the parent's layout.
pub fn inherit_label(parent_template: &str) -> String {
    format!("inherit from parent ({parent_template})")
}

/// Merge layout lists into `(value, label)` choices, first occurrence wins.
pub fn merge_layouts(sources: &[Vec<String>]) -> Vec<(String, String)> {
    let mut choices: Vec<(String, String)> = Vec::new();
    for name in sources.iter().flatten() {
        if !choices.iter().any(|(value, _)| value == name) {
            choices.push((name.clone(), name.clone()));
        }
    }
    choices
}

/// Put the "inherit from parent" choice first and drop the parent's template
/// from the flat list, since choosing it explicitly means the same thing.
pub fn with_inherit_choice(
    mut choices: Vec<(String, String)>,
    parent_template: Option<&str>,
) -> Vec<(String, String)> {
    let parent_template = parent_template.unwrap_or_default();
    choices.retain(|(value, _)| value != parent_template);
    choices.insert(0, (String::new(), inherit_label(parent_template)));
    choices
}

/// Whether a node is linked to main-site content.
///
/// Holds when the owning site relates to its main site, the node points at a
/// main-site node, and the node is either an alias or a folder.
pub fn is_related(site: Option<&Site>, content: &Content) -> bool {
    site.is_some_and(|s| s.relate_main_site)
        && content.main_site_content_id.is_some()
        && (content.is_alias() || content.is_folder())
}

/// Decode a URL-encoded form value, treating `+` as a space.
fn decode_name(name: &str) -> String {
    let spaced = name.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// Stages the content form datasources for one edit request.
pub struct FormAssembler<'a> {
    services: &'a ContentServices,
    controller: &'a ControllerInfo,
}

impl<'a> FormAssembler<'a> {
    pub fn new(services: &'a ContentServices, controller: &'a ControllerInfo) -> Self {
        Self {
            services,
            controller,
        }
    }

    /// Publish the form choices to the view and normalize the working copy of
    /// the submitted data.
    pub async fn assemble(
        &self,
        request: &mut ContentRequest,
        state: &mut ViewState,
        site_id: i64,
        content_id: Option<i64>,
    ) -> Result<()> {
        let contents = self.services.contents.as_ref();

        let exclude_id = if self.controller.name == FOLDER_CONTROLLER {
            content_id
        } else {
            None
        };

        let mut data = request.data.clone();
        let mut content = data.content.take().unwrap_or_default();

        let layout_templates = self.layout_templates(&content).await?;

        content.name = decode_name(&content.name);

        state.set("layout_templates", &layout_templates);
        state.set(
            "parent_contents",
            &contents.folder_list(site_id, exclude_id).await?,
        );
        state.set("authors", &self.services.users.user_list().await?);

        let site = match content_id {
            Some(id) => contents.find_by_id(id).await?.and_then(|r| r.site),
            None => None,
        };
        let main_site_id = site
            .as_ref()
            .and_then(|s| s.main_site_id)
            .unwrap_or(MAIN_SITE_ID);

        let site_list = contents.site_list().await?;
        let main_site_display_name = site_list
            .iter()
            .find(|(id, _)| *id == MAIN_SITE_ID)
            .map(|(_, name)| name.clone())
            .unwrap_or_default();
        let mut sites = vec![(String::new(), String::new())];
        sites.extend(site_list.into_iter().map(|(id, name)| (id.to_string(), name)));

        state.set("sites", &sites);
        state.set("main_site_display_name", &main_site_display_name);
        state.set("main_site_id", &main_site_id);

        let related_contents = match content_id {
            Some(id) => contents.related_contents(id).await?,
            None => Vec::new(),
        };
        state.set("related_contents", &related_contents);

        let related = is_related(site.as_ref(), &content);
        state.set("related", &related);

        debug!(
            content_id = ?content_id,
            site_id,
            layouts = layout_templates.len(),
            related,
            "content form staged"
        );

        data.content = Some(content);
        data.site = site;
        request.data = data;
        Ok(())
    }

    /// Layout choices of the theme and the controller's plugin.
    async fn layout_templates(&self, content: &Content) -> Result<Vec<(String, String)>> {
        let catalog = self.services.layouts.as_ref();
        let theme = self.services.theme.as_str();

        let mut sources = vec![catalog.layouts(theme, None)?];
        if let Some(plugin) = self.controller.plugin.as_deref() {
            sources.push(catalog.layouts(theme, Some(plugin))?);
        }
        let choices = merge_layouts(&sources);

        if content.is_root() {
            return Ok(choices);
        }

        let contents = self.services.contents.as_ref();
        let parent_template = match content.id {
            Some(_) => parent_layout_template(contents, content.id).await?,
            None => layout_under(contents, content.parent_id).await?,
        };
        Ok(with_inherit_choice(choices, parent_template.as_deref()))
    }
}
