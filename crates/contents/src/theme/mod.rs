//! Layout templates of the active theme.

mod catalog;

pub use catalog::{FsLayoutCatalog, LayoutCatalog, StaticLayoutCatalog};
