//! Storage layer for AquaSentry
//!
//! This module owns the on-disk SQLite representation, organized into
//! logical components:
//! - `models`: Raw row shapes as stored
//! - `schema`: Store handle, readiness state and connection management
//! - `migrations`: Versioned schema definitions and the legacy reset
//! - `queries`: CRUD and aggregate statements

pub mod migrations;
pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export the main types and store struct for easy access
pub use models::*;
pub use schema::{AquaStore, DatabaseLocation, StoreOptions, StoreState};
