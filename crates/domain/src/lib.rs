//! Domain layer for the portfolio backend.
//!
//! This crate contains:
//! - The page tree model and its content variants (Home, About, Gallery, Contact)
//! - Gallery block definitions
//! - Edit-panel metadata consumed by editorial clients

pub mod models;
