//! Fish repository

use super::parse_timestamp;
use crate::error::Result;
use crate::models::{Fish, FishPatch, NewFish};
use crate::storage::{AquaStore, FishRow};
use crate::{FishId, TankId};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FishRepository {
    store: Arc<AquaStore>,
}

impl FishRepository {
    pub fn new(store: Arc<AquaStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<AquaStore> {
        &self.store
    }

    pub async fn create(&self, fish: NewFish) -> Result<Fish> {
        to_fish(self.store.create_fish(fish).await?)
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<Fish>> {
        self.store
            .get_all_fishes()
            .await?
            .into_iter()
            .map(to_fish)
            .collect()
    }

    pub async fn get(&self, id: FishId) -> Result<Option<Fish>> {
        self.store.get_fish_by_id(id).await?.map(to_fish).transpose()
    }

    pub async fn update(&self, id: FishId, patch: FishPatch) -> Result<()> {
        self.store.update_fish(id, patch).await
    }

    pub async fn delete(&self, id: FishId) -> Result<()> {
        self.store.delete_fish(id).await
    }
}

fn to_fish(row: FishRow) -> Result<Fish> {
    Ok(Fish {
        id: FishId::new(row.id),
        species: row.species,
        age: row.age,
        size: row.size,
        tank_id: row.tank_id.map(TankId::new),
        created_at: parse_timestamp(&row.created_at)?,
    })
}
