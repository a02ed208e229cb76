//! Contents component - per-request glue between controllers and the content tree.
//!
//! A controller creates the component in its initialize phase and calls
//! [`ContentsComponent::before_render`] before rendering:
//!
//! - Front end: the content addressed by the request is attached, and the
//!   layout, breadcrumbs, title, and description are taken from it.
//! - Admin: the content list breadcrumb and sub-menu are added, and on the
//!   edit action the content form datasources are staged.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::models::Content;
use crate::repository::{ContentRepository, UserRepository};
use crate::theme::LayoutCatalog;

use super::breadcrumb::build_crumbs;
use super::form::FormAssembler;
use super::layout::parent_layout_template;
use super::request::{ContentRequest, ControllerInfo, Crumb, ViewState};
use super::settings::SettingsRegistry;

/// Action editing an alias node; always treated as an edit action.
pub const EDIT_ALIAS_ACTION: &str = "edit_alias";

/// Admin sub-menu element of the content list.
pub const CONTENTS_SUB_MENU: &str = "contents";

/// Breadcrumb leading back to the admin content list.
pub const CONTENT_LIST_TITLE: &str = "Contents";
pub const CONTENT_LIST_URL: &str = "/admin/contents";

/// Per-controller options.
#[derive(Debug, Clone)]
pub struct ComponentOptions {
    /// Stage the content form on the edit action.
    pub use_form: bool,
    /// Name of the edit action.
    pub edit_action: String,
    /// Content type handled by the controller; derived from the controller
    /// when unset.
    pub content_type: Option<String>,
}

impl Default for ComponentOptions {
    fn default() -> Self {
        Self {
            use_form: false,
            edit_action: "edit".to_string(),
            content_type: None,
        }
    }
}

impl ComponentOptions {
    /// Options for a controller that edits content through the content form.
    pub fn with_form() -> Self {
        Self {
            use_form: true,
            ..Self::default()
        }
    }
}

/// Shared services the component reads from.
#[derive(Clone)]
pub struct ContentServices {
    pub contents: Arc<dyn ContentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub layouts: Arc<dyn LayoutCatalog>,
    pub settings: Arc<SettingsRegistry>,
    /// Active theme.
    pub theme: String,
}

impl std::fmt::Debug for ContentServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentServices")
            .field("contents", &"ContentRepository")
            .field("users", &"UserRepository")
            .field("layouts", &"LayoutCatalog")
            .field("settings", &self.settings.len())
            .field("theme", &self.theme)
            .finish()
    }
}

/// Whether the content form may be staged for this request.
///
/// Decided at initialize from the controller options and action, and carried
/// to [`ContentsComponent::before_render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCapability {
    Unavailable,
    Available,
}

/// The contents component of one request.
#[derive(Debug)]
pub struct ContentsComponent {
    services: ContentServices,
    controller: ControllerInfo,
    content_type: String,
    /// Preview mode requested by the query string ("default", "alias", ...).
    preview: Option<String>,
    form: FormCapability,
}

impl ContentsComponent {
    /// Initialize phase.
    pub async fn initialize(
        services: ContentServices,
        controller: ControllerInfo,
        options: ComponentOptions,
        request: &mut ContentRequest,
        state: &mut ViewState,
    ) -> Result<Self> {
        let content_type = options
            .content_type
            .clone()
            .unwrap_or_else(|| controller_type(&controller));

        let is_edit_action =
            controller.action == options.edit_action || controller.action == EDIT_ALIAS_ACTION;
        let form = if options.use_form && controller.is_admin() && is_edit_action {
            FormCapability::Available
        } else {
            FormCapability::Unavailable
        };

        let mut component = Self {
            services,
            controller,
            content_type,
            preview: None,
            form,
        };

        if component.controller.is_admin() {
            debug!(
                content_type = %component.content_type,
                types = component.services.settings.len(),
                form = ?component.form,
                "contents component ready for admin"
            );
        } else {
            component.setup_front(request, state).await?;
        }

        Ok(component)
    }

    /// Attach the addressed content to the request and derive page settings.
    async fn setup_front(&mut self, request: &mut ContentRequest, state: &mut ViewState) -> Result<()> {
        if request.requested {
            let url = request.content_url();
            match self.services.contents.find_by_url(&url).await? {
                Some(record) => {
                    debug!(url = %url, id = ?record.content.id, "content attached to request");
                    request.content = Some(record.content);
                    request.site = record.site;
                }
                None => debug!(url = %url, "no content at url"),
            }
        }

        if let Some(mode) = request.preview().map(str::to_string) {
            if let Some(previewed) = request.data.content.clone() {
                debug!(mode = %mode, "previewing submitted content");
                request.content = Some(previewed);
                // Preview posts come from the edit form of another request.
                request.security.validate_post = false;
                request.security.csrf_check = false;
            }
            self.preview = Some(mode);
        }

        let Some(content) = request.content.clone() else {
            return Ok(());
        };

        state.layout = match content.own_layout_template() {
            Some(template) => Some(template.to_string()),
            None => self.get_parent_layout_template(content.id).await?,
        };
        state.crumbs = self.get_crumbs(content.id, request).await?;
        state.set("description", content.description.as_deref().unwrap_or_default());
        state.page_title = Some(content.title);

        Ok(())
    }

    /// Before-render phase.
    pub async fn before_render(
        &self,
        request: &mut ContentRequest,
        state: &mut ViewState,
    ) -> Result<()> {
        if !self.controller.is_admin() {
            return Ok(());
        }

        state.set("contents_settings", self.services.settings.items());
        state
            .crumbs
            .insert(0, Crumb::new(CONTENT_LIST_TITLE, CONTENT_LIST_URL));

        if state.sub_menu_elements.is_empty() {
            state.sub_menu_elements = vec![CONTENTS_SUB_MENU.to_string()];
        } else if !state.sub_menu_elements.iter().any(|e| e == CONTENTS_SUB_MENU) {
            state.sub_menu_elements.insert(0, CONTENTS_SUB_MENU.to_string());
        }

        if self.form == FormCapability::Available {
            let Some(content) = request.data.content.as_ref() else {
                return Ok(());
            };
            let (site_id, content_id) = (content.site_id, content.id);
            self.setting_form(request, state, site_id, content_id).await?;
            state.set("content_form", &true);
        }

        Ok(())
    }

    /// Stage the content form datasources for the edit view.
    pub async fn setting_form(
        &self,
        request: &mut ContentRequest,
        state: &mut ViewState,
        site_id: i64,
        content_id: Option<i64>,
    ) -> Result<()> {
        FormAssembler::new(&self.services, &self.controller)
            .assemble(request, state, site_id, content_id)
            .await
    }

    /// Breadcrumbs of the node `id`.
    pub async fn get_crumbs(&self, id: Option<i64>, request: &ContentRequest) -> Result<Vec<Crumb>> {
        let path = match id {
            Some(id) => self.services.contents.path(id).await?,
            None => Vec::new(),
        };
        let previewed = self.preview.as_ref().and(request.content.as_ref());
        Ok(build_crumbs(&path, previewed))
    }

    /// Layout template the node `id` inherits from its ancestors.
    pub async fn get_parent_layout_template(&self, id: Option<i64>) -> Result<Option<String>> {
        parent_layout_template(self.services.contents.as_ref(), id).await
    }

    /// Content node of this component's type, optionally for one entity.
    pub async fn get_content(&self, entity_id: Option<i64>) -> Result<Option<Content>> {
        self.services
            .contents
            .find_by_type(&self.content_type, entity_id)
            .await
    }

    /// Registered type keys mapped to display titles.
    pub fn get_types(&self) -> BTreeMap<String, String> {
        self.services.settings.types()
    }

    /// Content type handled by the controller.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Preview mode of the request, if previewing.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn form_capability(&self) -> FormCapability {
        self.form
    }
}

/// Content type implied by a controller: `"Plugin.Model"` or `"Model"`.
fn controller_type(controller: &ControllerInfo) -> String {
    match controller.plugin.as_deref() {
        Some(plugin) => format!("{plugin}.{}", controller.model_class),
        None => controller.model_class.clone(),
    }
}
