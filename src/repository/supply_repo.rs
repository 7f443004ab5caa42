//! Supply repository (create and list only)

use super::parse_timestamp;
use crate::error::Result;
use crate::models::{NewSupply, Supply};
use crate::storage::{AquaStore, SupplyRow};
use crate::SupplyId;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SupplyRepository {
    store: Arc<AquaStore>,
}

impl SupplyRepository {
    pub fn new(store: Arc<AquaStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, supply: NewSupply) -> Result<Supply> {
        to_supply(self.store.create_supply(supply).await?)
    }

    pub async fn list(&self) -> Result<Vec<Supply>> {
        self.store
            .get_all_supplies()
            .await?
            .into_iter()
            .map(to_supply)
            .collect()
    }
}

fn to_supply(row: SupplyRow) -> Result<Supply> {
    Ok(Supply {
        id: SupplyId::new(row.id),
        name: row.name,
        quantity: row.quantity,
        created_at: parse_timestamp(&row.created_at)?,
    })
}
