//! Row shapes as they come out of SQLite
//!
//! Timestamps stay as their stored ISO-8601 text here; the repositories parse
//! them into dates.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A `tanks` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankRow {
    pub id: i64,
    pub name: String,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub ammonia: Option<f64>,
    pub nitrite: Option<f64>,
    pub created_at: String,
}

/// A `fishes` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishRow {
    pub id: i64,
    pub species: String,
    pub age: u32,
    pub size: f64,
    pub tank_id: Option<i64>,
    pub created_at: String,
}

/// A `supplies` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyRow {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub created_at: String,
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub tanks: u64,
    pub fishes: u64,
    pub supplies: u64,
}

pub(crate) const TANK_COLUMNS: &str = "id, name, ph, temperature, ammonia, nitrite, createdAt";
pub(crate) const FISH_COLUMNS: &str = "id, species, age, size, tankId, createdAt";
pub(crate) const SUPPLY_COLUMNS: &str = "id, name, quantity, createdAt";

impl TankRow {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            ph: row.get(2)?,
            temperature: row.get(3)?,
            ammonia: row.get(4)?,
            nitrite: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl FishRow {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            species: row.get(1)?,
            age: row.get(2)?,
            size: row.get(3)?,
            tank_id: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl SupplyRow {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
