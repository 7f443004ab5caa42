//! Command implementations for the aquasentry CLI

pub mod fish;
pub mod level;
pub mod supply;
pub mod tank;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::storage::{AquaStore, DatabaseLocation, StoreOptions};
use crate::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Resources shared by every command
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<AquaStore>,
    pub as_json: bool,
}

impl AppContext {
    /// Context backed by the configured database file. The store is not
    /// opened here; controllers and handlers initialize it on first use.
    pub fn new(config: AppConfig, as_json: bool) -> Self {
        debug!(path = %config.database_path.display(), "using database");
        let store = AquaStore::new(
            DatabaseLocation::File(config.database_path.clone()),
            StoreOptions {
                reset_schema: config.reset_schema,
            },
        );
        Self::with_store(config, Arc::new(store), as_json)
    }

    pub fn with_store(config: AppConfig, store: Arc<AquaStore>, as_json: bool) -> Self {
        Self {
            config,
            store,
            as_json,
        }
    }

    /// Print `value` as pretty JSON, or the text lines from `render`.
    pub(crate) fn emit<T, F>(&self, value: &T, render: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        if self.as_json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            let text = render(value);
            if !text.is_empty() {
                println!("{text}");
            }
        }
        Ok(())
    }
}

/// Outcome of an edit that carried no changes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unchanged<I> {
    pub id: I,
    pub changed: bool,
}

impl<I> Unchanged<I> {
    pub fn new(id: I) -> Self {
        Self { id, changed: false }
    }
}

/// Render an optional reading, `-` when empty.
pub(crate) fn reading(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}
