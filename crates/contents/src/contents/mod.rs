//! Content tree request handling.

pub mod breadcrumb;
pub mod component;
pub mod form;
pub mod layout;
pub mod request;
pub mod settings;

pub use component::{
    CONTENTS_SUB_MENU, ComponentOptions, ContentServices, ContentsComponent, FormCapability,
};
pub use request::{
    ContentData, ContentRequest, ControllerInfo, Crumb, SecurityChecks, Surface, ViewState,
};
pub use settings::{ContentTypeSetting, SettingsRegistry};
