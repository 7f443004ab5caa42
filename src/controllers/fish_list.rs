//! Fish list controller

use super::{ListCache, ListState};
use crate::error::Result;
use crate::models::{Fish, FishPatch, NewFish};
use crate::repository::FishRepository;
use crate::storage::AquaStore;
use crate::FishId;
use std::sync::Arc;
use tracing::{debug, error};

/// Cached, newest-first view of all fish
pub struct FishListController {
    repo: FishRepository,
    cache: ListCache<Fish>,
}

impl FishListController {
    pub fn new(store: Arc<AquaStore>) -> Self {
        Self {
            repo: FishRepository::new(store),
            cache: ListCache::new(),
        }
    }

    pub fn state(&self) -> ListState<Fish> {
        self.cache.snapshot()
    }

    pub fn fishes(&self) -> Vec<Fish> {
        self.cache.snapshot().items
    }

    pub fn is_loading(&self) -> bool {
        self.cache.snapshot().loading
    }

    /// Initialize the store and load every fish. See [`crate::controllers::TankListController::mount`].
    pub async fn mount(&self) -> Result<()> {
        let store = self.repo.store();
        store.initialize().await.inspect_err(|e| {
            error!(error = %e, "error initializing database");
            self.cache.fail(e.to_string());
        })?;

        match store.table_counts().await {
            Ok(counts) => debug!(
                tanks = counts.tanks,
                fishes = counts.fishes,
                supplies = counts.supplies,
                "database contents"
            ),
            Err(e) => debug!(error = %e, "could not count table rows"),
        }

        self.refresh().await
    }

    /// Re-read all fish from the store, initializing it first if needed.
    pub async fn refresh(&self) -> Result<()> {
        let loaded = match self.repo.store().initialize().await {
            Ok(()) => self.repo.list().await,
            Err(e) => Err(e),
        };

        match loaded {
            Ok(fishes) => {
                debug!(count = fishes.len(), "fishes loaded");
                self.cache.replace(fishes);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error loading fishes");
                self.cache.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn add(&self, fish: NewFish) -> Result<Fish> {
        self.repo.store().initialize().await?;
        let created = self.repo.create(fish).await.inspect_err(|e| {
            error!(error = %e, "error adding fish");
        })?;
        self.cache.prepend(created.clone());
        Ok(created)
    }

    pub async fn edit(&self, id: FishId, patch: FishPatch) -> Result<()> {
        self.repo.store().initialize().await?;
        self.repo.update(id, patch.clone()).await.inspect_err(|e| {
            error!(fish_id = %id, error = %e, "error updating fish");
        })?;
        if !self.cache.patch(id, |fish| fish.apply(&patch)) {
            debug!(fish_id = %id, "edited fish not in cache");
        }
        Ok(())
    }

    pub async fn delete(&self, id: FishId) -> Result<()> {
        self.repo.store().initialize().await?;
        self.repo.delete(id).await.inspect_err(|e| {
            error!(fish_id = %id, error = %e, "error deleting fish");
        })?;
        self.cache.remove(id);
        Ok(())
    }

    /// Look a fish up in the store, bypassing the cache.
    pub async fn fetch(&self, id: FishId) -> Result<Option<Fish>> {
        self.repo.store().initialize().await?;
        self.repo.get(id).await
    }
}
