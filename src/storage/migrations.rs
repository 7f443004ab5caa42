//! Versioned schema migrations
//!
//! Applied migrations are mirrored into `PRAGMA user_version`, so reopening an
//! existing database only runs what is missing.

use crate::error::Result;
use rusqlite::Connection;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "
        CREATE TABLE IF NOT EXISTS tanks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            ph REAL,
            temperature REAL,
            ammonia REAL,
            nitrite REAL,
            createdAt TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS fishes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            species TEXT NOT NULL,
            age INTEGER NOT NULL CHECK (age >= 0),
            size REAL NOT NULL CHECK (size >= 0),
            tankId INTEGER,
            createdAt TEXT NOT NULL,
            FOREIGN KEY (tankId) REFERENCES tanks(id) ON DELETE SET NULL
        );

        CREATE TABLE IF NOT EXISTS supplies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            createdAt TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_fishes_tank ON fishes(tankId);
    ",
}];

/// Latest schema version known to this build
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Schema version recorded in the database file
pub fn current_version(conn: &Connection) -> Result<u32> {
    let version = conn.query_row("PRAGMA user_version", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Apply every migration newer than the recorded version, in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        // Written by a newer build; open it without touching the schema.
        warn!(current, latest, "database schema is newer than this build");
        return Ok(());
    }

    if current == latest {
        debug!(version = current, "schema up to date");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {}", migration.version))?;
        info!(version = migration.version, "applied schema migration");
    }
    tx.commit()?;

    Ok(())
}

/// Drop all tables and rebuild them from scratch. Every row is lost.
pub fn reset_schema(conn: &mut Connection) -> Result<()> {
    warn!("dropping all tables");
    conn.execute_batch(
        "DROP TABLE IF EXISTS fishes;
         DROP TABLE IF EXISTS tanks;
         DROP TABLE IF EXISTS supplies;
         PRAGMA user_version = 0;",
    )?;
    apply_migrations(conn)
}
