//! Repository implementations for database operations.

pub mod page;

pub use page::PageRepository;
