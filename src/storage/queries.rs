//! CRUD and aggregate statements
//!
//! Listing queries return newest first. `createdAt` has millisecond
//! resolution, so `id` breaks ties between rows written in the same tick.

use super::{models::*, schema::AquaStore};
use crate::error::{AquaError, Result};
use crate::models::{FishPatch, NewFish, NewSupply, NewTank, TankPatch};
use crate::{FishId, TankId};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension};
use tracing::{debug, info};

/// Current time as stored in `createdAt` columns
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl AquaStore {
    /* ------------------------ Tanks ------------------------ */

    /// Insert a tank and return the persisted row
    pub async fn create_tank(&self, tank: NewTank) -> Result<TankRow> {
        self.ensure_ready()?;
        tank.validate()?;
        self.with_conn("create_tank", move |conn| {
            let created_at = now_timestamp();
            conn.execute(
                "INSERT INTO tanks (name, ph, temperature, ammonia, nitrite, createdAt)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    tank.name,
                    tank.ph,
                    tank.temperature,
                    tank.ammonia,
                    tank.nitrite,
                    created_at
                ],
            )?;
            let row = TankRow {
                id: conn.last_insert_rowid(),
                name: tank.name,
                ph: tank.ph,
                temperature: tank.temperature,
                ammonia: tank.ammonia,
                nitrite: tank.nitrite,
                created_at,
            };
            info!(tank_id = row.id, name = %row.name, "tank created");
            Ok(row)
        })
        .await
    }

    /// All tanks, newest first
    pub async fn get_all_tanks(&self) -> Result<Vec<TankRow>> {
        self.with_conn("get_all_tanks", |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TANK_COLUMNS} FROM tanks ORDER BY createdAt DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], TankRow::from_row)?;

            let mut tanks = Vec::new();
            for row in rows {
                tanks.push(row?);
            }
            Ok(tanks)
        })
        .await
    }

    pub async fn get_tank_by_id(&self, id: TankId) -> Result<Option<TankRow>> {
        self.with_conn("get_tank_by_id", move |conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {TANK_COLUMNS} FROM tanks WHERE id = ?"),
                    params![id.as_i64()],
                    TankRow::from_row,
                )
                .optional()?;
            Ok(row)
        })
        .await
    }

    /// Apply a partial update. An empty patch touches nothing.
    pub async fn update_tank(&self, id: TankId, patch: TankPatch) -> Result<()> {
        self.ensure_ready()?;
        patch.validate()?;
        if patch.is_empty() {
            debug!(tank_id = %id, "empty tank patch, nothing to update");
            return Ok(());
        }

        self.with_conn("update_tank", move |conn| {
            let mut assignments = Vec::new();
            if let Some(name) = patch.name {
                assignments.push(("name", Value::Text(name)));
            }
            if let Some(ph) = patch.ph {
                assignments.push(("ph", nullable_real(ph)));
            }
            if let Some(temperature) = patch.temperature {
                assignments.push(("temperature", nullable_real(temperature)));
            }
            if let Some(ammonia) = patch.ammonia {
                assignments.push(("ammonia", nullable_real(ammonia)));
            }
            if let Some(nitrite) = patch.nitrite {
                assignments.push(("nitrite", nullable_real(nitrite)));
            }

            update_row(conn, "tanks", "tank", id.as_i64(), assignments)
        })
        .await
    }

    /// Delete a tank. Fish that lived in it keep existing with no tank.
    pub async fn delete_tank(&self, id: TankId) -> Result<()> {
        self.with_conn("delete_tank", move |conn| {
            let removed = conn.execute("DELETE FROM tanks WHERE id = ?", params![id.as_i64()])?;
            if removed == 0 {
                debug!(tank_id = %id, "delete of missing tank");
            } else {
                info!(tank_id = %id, "tank deleted");
            }
            Ok(())
        })
        .await
    }

    /* ------------------------ Fishes ------------------------ */

    /// Insert a fish and return the persisted row.
    ///
    /// A `tank_id` that matches no tank fails the foreign-key check.
    pub async fn create_fish(&self, fish: NewFish) -> Result<FishRow> {
        self.ensure_ready()?;
        fish.validate()?;
        self.with_conn("create_fish", move |conn| {
            let created_at = now_timestamp();
            let tank_id = fish.tank_id.map(|t| t.as_i64());
            conn.execute(
                "INSERT INTO fishes (species, age, size, tankId, createdAt) VALUES (?, ?, ?, ?, ?)",
                params![fish.species, fish.age, fish.size, tank_id, created_at],
            )?;
            let row = FishRow {
                id: conn.last_insert_rowid(),
                species: fish.species,
                age: fish.age,
                size: fish.size,
                tank_id,
                created_at,
            };
            info!(fish_id = row.id, species = %row.species, tank_id = ?row.tank_id, "fish created");
            Ok(row)
        })
        .await
    }

    /// All fish, newest first
    pub async fn get_all_fishes(&self) -> Result<Vec<FishRow>> {
        self.with_conn("get_all_fishes", |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {FISH_COLUMNS} FROM fishes ORDER BY createdAt DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], FishRow::from_row)?;

            let mut fishes = Vec::new();
            for row in rows {
                fishes.push(row?);
            }
            Ok(fishes)
        })
        .await
    }

    pub async fn get_fish_by_id(&self, id: FishId) -> Result<Option<FishRow>> {
        self.with_conn("get_fish_by_id", move |conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {FISH_COLUMNS} FROM fishes WHERE id = ?"),
                    params![id.as_i64()],
                    FishRow::from_row,
                )
                .optional()?;
            Ok(row)
        })
        .await
    }

    /// Apply a partial update. An empty patch touches nothing.
    pub async fn update_fish(&self, id: FishId, patch: FishPatch) -> Result<()> {
        self.ensure_ready()?;
        patch.validate()?;
        if patch.is_empty() {
            debug!(fish_id = %id, "empty fish patch, nothing to update");
            return Ok(());
        }

        self.with_conn("update_fish", move |conn| {
            let mut assignments = Vec::new();
            if let Some(species) = patch.species {
                assignments.push(("species", Value::Text(species)));
            }
            if let Some(age) = patch.age {
                assignments.push(("age", Value::Integer(i64::from(age))));
            }
            if let Some(size) = patch.size {
                assignments.push(("size", Value::Real(size)));
            }
            if let Some(tank_id) = patch.tank_id {
                let value = tank_id.map_or(Value::Null, |t| Value::Integer(t.as_i64()));
                assignments.push(("tankId", value));
            }

            update_row(conn, "fishes", "fish", id.as_i64(), assignments)
        })
        .await
    }

    pub async fn delete_fish(&self, id: FishId) -> Result<()> {
        self.with_conn("delete_fish", move |conn| {
            let removed = conn.execute("DELETE FROM fishes WHERE id = ?", params![id.as_i64()])?;
            if removed == 0 {
                debug!(fish_id = %id, "delete of missing fish");
            } else {
                info!(fish_id = %id, "fish deleted");
            }
            Ok(())
        })
        .await
    }

    /// Number of fish assigned to a tank; 0 when none are.
    pub async fn get_fish_count_by_tank_id(&self, tank_id: TankId) -> Result<u64> {
        self.with_conn("get_fish_count_by_tank_id", move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM fishes WHERE tankId = ?",
                params![tank_id.as_i64()],
                |row| row.get(0),
            )?;
            debug!(tank_id = %tank_id, count, "fish count for tank");
            Ok(u64::try_from(count).unwrap_or_default())
        })
        .await
    }

    /* ------------------------ Supplies ------------------------ */

    pub async fn create_supply(&self, supply: NewSupply) -> Result<SupplyRow> {
        self.ensure_ready()?;
        supply.validate()?;
        self.with_conn("create_supply", move |conn| {
            let created_at = now_timestamp();
            conn.execute(
                "INSERT INTO supplies (name, quantity, createdAt) VALUES (?, ?, ?)",
                params![supply.name, supply.quantity, created_at],
            )?;
            Ok(SupplyRow {
                id: conn.last_insert_rowid(),
                name: supply.name,
                quantity: supply.quantity,
                created_at,
            })
        })
        .await
    }

    /// All supplies, newest first
    pub async fn get_all_supplies(&self) -> Result<Vec<SupplyRow>> {
        self.with_conn("get_all_supplies", |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SUPPLY_COLUMNS} FROM supplies ORDER BY createdAt DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], SupplyRow::from_row)?;

            let mut supplies = Vec::new();
            for row in rows {
                supplies.push(row?);
            }
            Ok(supplies)
        })
        .await
    }

    /* ------------------------ Diagnostics ------------------------ */

    /// Row count of every table
    pub async fn table_counts(&self) -> Result<TableCounts> {
        self.with_conn("table_counts", |conn| {
            Ok(TableCounts {
                tanks: count_rows(conn, "tanks")?,
                fishes: count_rows(conn, "fishes")?,
                supplies: count_rows(conn, "supplies")?,
            })
        })
        .await
    }
}

fn nullable_real(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::Real)
}

/// `UPDATE <table> SET a = ?, b = ? WHERE id = ?`, failing when no row matched.
fn update_row(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    id: i64,
    assignments: Vec<(&'static str, Value)>,
) -> Result<()> {
    let set_clause = assignments
        .iter()
        .map(|(column, _)| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {table} SET {set_clause} WHERE id = ?");

    let mut values: Vec<Value> = assignments.into_iter().map(|(_, value)| value).collect();
    values.push(Value::Integer(id));

    let changed = conn.execute(&sql, params_from_iter(values))?;
    if changed == 0 {
        return Err(AquaError::NotFound { entity, id });
    }
    debug!(entity, id, "row updated");
    Ok(())
}

fn count_rows(conn: &Connection, table: &'static str) -> Result<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(u64::try_from(count).unwrap_or_default())
}
