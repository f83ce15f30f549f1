//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod page;

pub use page::{ContentColumns, HomeMenuEntity, MenuLink, PageEntity, PageKindDb};
