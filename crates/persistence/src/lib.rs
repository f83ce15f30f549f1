//! Persistence layer for the portfolio backend.
//!
//! This crate contains:
//! - Database connection management (embedded SQLite via sqlx)
//! - Entity definitions (database row mappings)
//! - The page-tree repository

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
