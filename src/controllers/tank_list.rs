//! Tank list controller

use super::{ListCache, ListState};
use crate::error::Result;
use crate::models::{NewTank, Tank, TankPatch};
use crate::repository::TankRepository;
use crate::storage::AquaStore;
use crate::TankId;
use std::sync::Arc;
use tracing::{debug, error};

/// Cached, newest-first view of all tanks
pub struct TankListController {
    repo: TankRepository,
    cache: ListCache<Tank>,
}

impl TankListController {
    pub fn new(store: Arc<AquaStore>) -> Self {
        Self {
            repo: TankRepository::new(store),
            cache: ListCache::new(),
        }
    }

    pub fn state(&self) -> ListState<Tank> {
        self.cache.snapshot()
    }

    pub fn tanks(&self) -> Vec<Tank> {
        self.cache.snapshot().items
    }

    pub fn is_loading(&self) -> bool {
        self.cache.snapshot().loading
    }

    /// Initialize the store and load every tank.
    ///
    /// On failure the cache stays empty, `loading` turns false, the message
    /// lands in `error` and the error is returned as well.
    pub async fn mount(&self) -> Result<()> {
        self.refresh().await
    }

    /// Re-read all tanks from the store.
    pub async fn refresh(&self) -> Result<()> {
        let loaded = match self.repo.store().initialize().await {
            Ok(()) => self.repo.list().await,
            Err(e) => Err(e),
        };

        match loaded {
            Ok(tanks) => {
                debug!(count = tanks.len(), "tanks loaded");
                self.cache.replace(tanks);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error loading tanks");
                self.cache.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn add(&self, tank: NewTank) -> Result<Tank> {
        self.repo.store().initialize().await?;
        let created = self.repo.create(tank).await.inspect_err(|e| {
            error!(error = %e, "error adding tank");
        })?;
        self.cache.prepend(created.clone());
        Ok(created)
    }

    pub async fn edit(&self, id: TankId, patch: TankPatch) -> Result<()> {
        self.repo.store().initialize().await?;
        self.repo.update(id, patch.clone()).await.inspect_err(|e| {
            error!(tank_id = %id, error = %e, "error editing tank");
        })?;
        if !self.cache.patch(id, |tank| tank.apply(&patch)) {
            debug!(tank_id = %id, "edited tank not in cache");
        }
        Ok(())
    }

    pub async fn delete(&self, id: TankId) -> Result<()> {
        self.repo.store().initialize().await?;
        self.repo.delete(id).await.inspect_err(|e| {
            error!(tank_id = %id, error = %e, "error deleting tank");
        })?;
        self.cache.remove(id);
        Ok(())
    }

    /// Look a tank up in the store, bypassing the cache.
    pub async fn fetch(&self, id: TankId) -> Result<Option<Tank>> {
        self.repo.store().initialize().await?;
        self.repo.get(id).await
    }

    /// Fish count for every cached tank, one query per tank, in cache order.
    pub async fn fish_counts(&self) -> Result<Vec<(TankId, u64)>> {
        self.repo.store().initialize().await?;
        let mut counts = Vec::new();
        for tank in self.tanks() {
            counts.push((tank.id, self.repo.fish_count(tank.id).await?));
        }
        Ok(counts)
    }
}
