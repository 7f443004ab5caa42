//! Tank repository

use super::parse_timestamp;
use crate::error::Result;
use crate::models::{NewTank, Tank, TankPatch};
use crate::storage::{AquaStore, TankRow};
use crate::TankId;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TankRepository {
    store: Arc<AquaStore>,
}

impl TankRepository {
    pub fn new(store: Arc<AquaStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<AquaStore> {
        &self.store
    }

    pub async fn create(&self, tank: NewTank) -> Result<Tank> {
        to_tank(self.store.create_tank(tank).await?)
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<Tank>> {
        self.store
            .get_all_tanks()
            .await?
            .into_iter()
            .map(to_tank)
            .collect()
    }

    pub async fn get(&self, id: TankId) -> Result<Option<Tank>> {
        self.store.get_tank_by_id(id).await?.map(to_tank).transpose()
    }

    pub async fn update(&self, id: TankId, patch: TankPatch) -> Result<()> {
        self.store.update_tank(id, patch).await
    }

    pub async fn delete(&self, id: TankId) -> Result<()> {
        self.store.delete_tank(id).await
    }

    pub async fn fish_count(&self, id: TankId) -> Result<u64> {
        self.store.get_fish_count_by_tank_id(id).await
    }
}

fn to_tank(row: TankRow) -> Result<Tank> {
    Ok(Tank {
        id: TankId::new(row.id),
        name: row.name,
        ph: row.ph,
        temperature: row.temperature,
        ammonia: row.ammonia,
        nitrite: row.nitrite,
        created_at: parse_timestamp(&row.created_at)?,
    })
}
