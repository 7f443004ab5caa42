//! Store handle, readiness state and connection management

use super::migrations::{apply_migrations, reset_schema};
use crate::error::{AquaError, Result};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, error, info};

/// Where the database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    /// Private in-memory database, gone when the store is dropped.
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Drop and recreate all tables when the store opens.
    pub reset_schema: bool,
}

/// Observable readiness of an [`AquaStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Initializing,
    Ready,
    /// The last open attempt failed; the next `initialize()` retries.
    Failed(String),
}

enum Phase {
    Uninitialized,
    Initializing,
    Ready(Arc<Mutex<Connection>>),
    Failed(String),
}

/// Owner of the SQLite connection for tanks, fishes and supplies.
///
/// Created unopened; [`AquaStore::initialize`] opens the database and brings
/// the schema up to date. Every other operation fails with
/// [`AquaError::NotInitialized`] until that has succeeded.
pub struct AquaStore {
    location: DatabaseLocation,
    options: StoreOptions,
    phase: Mutex<Phase>,
    // Held for the whole open so concurrent callers wait on the one in flight.
    init_gate: tokio::sync::Mutex<()>,
    opens: AtomicUsize,
}

impl AquaStore {
    pub fn new(location: DatabaseLocation, options: StoreOptions) -> Self {
        Self {
            location,
            options,
            phase: Mutex::new(Phase::Uninitialized),
            init_gate: tokio::sync::Mutex::new(()),
            opens: AtomicUsize::new(0),
        }
    }

    /// Store backed by a database file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(DatabaseLocation::File(path.into()), StoreOptions::default())
    }

    /// Store backed by a private in-memory database
    pub fn in_memory() -> Self {
        Self::new(DatabaseLocation::Memory, StoreOptions::default())
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    pub fn state(&self) -> StoreState {
        match &*self.lock_phase() {
            Phase::Uninitialized => StoreState::Uninitialized,
            Phase::Initializing => StoreState::Initializing,
            Phase::Ready(_) => StoreState::Ready,
            Phase::Failed(message) => StoreState::Failed(message.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.lock_phase(), Phase::Ready(_))
    }

    /// How many times the database has been opened and its schema applied
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Open the database and apply the schema, once.
    ///
    /// Returns immediately when already ready. Callers arriving while an open
    /// is in flight wait for it and then share its outcome if it succeeded.
    pub async fn initialize(&self) -> Result<()> {
        if self.is_ready() {
            debug!("database already initialized");
            return Ok(());
        }

        let _gate = self.init_gate.lock().await;
        if self.is_ready() {
            debug!("database initialized by a concurrent caller");
            return Ok(());
        }

        self.set_phase(Phase::Initializing);
        let mut pending = PendingOpen { store: self, armed: true };
        let started_at = Instant::now();
        info!(location = ?self.location, "opening database");

        let location = self.location.clone();
        let options = self.options.clone();
        let opened = match tokio::task::spawn_blocking(move || open_connection(&location, &options)).await {
            Ok(result) => result,
            Err(join_error) => Err(join_error.into()),
        };

        pending.armed = false;
        match opened {
            Ok(conn) => {
                self.opens.fetch_add(1, Ordering::SeqCst);
                self.set_phase(Phase::Ready(Arc::new(Mutex::new(conn))));
                info!(
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    "database initialized"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error initializing database");
                self.set_phase(Phase::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Drop every table and recreate the schema on an open store.
    pub async fn reset(&self) -> Result<()> {
        self.with_conn("reset", reset_schema).await
    }

    /// Run `f` against the connection on the blocking pool.
    pub(crate) async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = self.handle()?;
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut conn)
        })
        .await;

        let result = match result {
            Ok(inner) => inner,
            Err(join_error) => Err(join_error.into()),
        };
        if let Err(e) = &result {
            error!(operation, error = %e, "store operation failed");
        }
        result
    }

    /// Fails with [`AquaError::NotInitialized`] unless the store is ready.
    pub(crate) fn ensure_ready(&self) -> Result<()> {
        self.handle().map(|_| ())
    }

    fn handle(&self) -> Result<Arc<Mutex<Connection>>> {
        match &*self.lock_phase() {
            Phase::Ready(conn) => Ok(Arc::clone(conn)),
            _ => Err(AquaError::NotInitialized),
        }
    }

    fn lock_phase(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_phase(&self, phase: Phase) {
        *self.lock_phase() = phase;
    }
}

// Puts the phase back to `Uninitialized` when an open is abandoned midway.
struct PendingOpen<'a> {
    store: &'a AquaStore,
    armed: bool,
}

impl Drop for PendingOpen<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut phase = self.store.lock_phase();
        if matches!(*phase, Phase::Initializing) {
            debug!("database open abandoned");
            *phase = Phase::Uninitialized;
        }
    }
}

impl std::fmt::Debug for AquaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AquaStore")
            .field("location", &self.location)
            .field("options", &self.options)
            .field("state", &self.state())
            .finish()
    }
}

fn open_connection(location: &DatabaseLocation, options: &StoreOptions) -> Result<Connection> {
    let mut conn = match location {
        DatabaseLocation::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Connection::open(path)?
        }
        DatabaseLocation::Memory => Connection::open_in_memory()?,
    };

    // ON DELETE SET NULL only fires with enforcement on.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    if options.reset_schema {
        reset_schema(&mut conn)?;
    } else {
        apply_migrations(&mut conn)?;
    }

    Ok(conn)
}
