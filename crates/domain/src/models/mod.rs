//! Domain models for the portfolio page tree.

pub mod blocks;
pub mod page;
pub mod panels;

pub use blocks::GalleryBlock;
pub use page::{NewPage, Page, PageContent, PageKind, RichText};
pub use panels::{content_panels, FieldPanel};
