//! Database models for the content tree.

pub mod content;
pub mod site;
pub mod user;

pub use content::{
    Content, ContentRecord, ContentSummary, FOLDER_TYPE, ROOT_CONTENT_ID, RelatedContent,
    folder_label, split_type,
};
pub use site::{MAIN_SITE_ID, Site};
pub use user::UserSummary;
