//! AquaSentry Library
//!
//! Records for an aquaculture operation (tanks, the fish living in them and
//! supplies on hand) kept in a local SQLite database, plus a poller for the
//! remote tank fill-level feed.
//!
//! ## Features
//!
//! - **Local Store**: [`storage::AquaStore`] opens the database once, migrates
//!   the schema and serves CRUD for tanks, fishes and supplies
//! - **List Controllers**: cached newest-first views that stay in step with
//!   the store after add, edit and delete
//! - **Level Monitor**: interval polling with single-flight fetches, colour
//!   bands and an eased gauge animation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aquasentry::{controllers::TankListController, models::NewTank, storage::AquaStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> aquasentry::Result<()> {
//! let store = Arc::new(AquaStore::file("/tmp/aquasentry.db"));
//! let tanks = TankListController::new(store);
//! tanks.mount().await?;
//! tanks.add(NewTank::named("Tank A")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export AQUASENTRY_DB_PATH=/var/lib/aquasentry/aquasentry.db
//! export AQUASENTRY_POLL_INTERVAL_MS=5000
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod controllers;
pub mod error;
pub mod level;
pub mod logging;
pub mod models;
pub mod repository;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{FishId, SupplyId, TankId};
pub use error::{AquaError, Result};
