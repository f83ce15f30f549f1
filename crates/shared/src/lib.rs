//! Shared utilities and common types for the portfolio backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Field validation logic (slugs, titles, email addresses)
//! - Slug derivation from page titles

pub mod slug;
pub mod validation;
