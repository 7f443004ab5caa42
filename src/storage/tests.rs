//! Unit tests for storage functionality

use super::*;
use crate::error::AquaError;
use crate::models::{FishPatch, NewFish, NewSupply, NewTank, TankPatch};
use crate::{FishId, TankId};
use std::sync::Arc;

async fn create_test_store() -> AquaStore {
    let store = AquaStore::in_memory();
    store.initialize().await.unwrap();
    store
}

async fn create_test_store_with_tank() -> (AquaStore, TankId) {
    let store = create_test_store().await;
    let tank = store.create_tank(NewTank::named("Tank A")).await.unwrap();
    (store, TankId::new(tank.id))
}

#[tokio::test]
async fn test_store_starts_uninitialized() {
    let store = AquaStore::in_memory();
    assert_eq!(store.state(), StoreState::Uninitialized);
    assert!(!store.is_ready());
    assert_eq!(store.open_count(), 0);
}

#[tokio::test]
async fn test_operations_before_initialize_fail() {
    let store = AquaStore::in_memory();

    let result = store.get_all_tanks().await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));

    let result = store.create_fish(NewFish::new("Tilapia", 6, 15.5)).await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));

    let result = store.get_fish_count_by_tank_id(TankId::new(1)).await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));

    // Readiness is checked before input is looked at.
    let result = store.update_tank(TankId::new(1), TankPatch::default()).await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));

    let result = store.update_fish(FishId::new(1), FishPatch::default()).await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));

    let result = store.create_tank(NewTank::named("  ")).await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));

    let result = store.create_fish(NewFish::new("", 1, -1.0)).await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));

    let result = store.create_supply(NewSupply::new(" ", 1.0)).await;
    assert!(matches!(result, Err(AquaError::NotInitialized)));
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let store = create_test_store().await;
    store.initialize().await.unwrap();
    store.initialize().await.unwrap();

    assert_eq!(store.state(), StoreState::Ready);
    assert_eq!(store.open_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_initialize_opens_once() {
    let store = Arc::new(AquaStore::in_memory());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.initialize().await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.open_count(), 1);
    assert_eq!(store.state(), StoreState::Ready);
    assert!(store.get_all_tanks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_initialize_can_retry() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file in the way").unwrap();
    let store = AquaStore::file(blocker.join("aquasentry.db"));

    let result = store.initialize().await;
    assert!(matches!(result, Err(AquaError::Io(_))));
    assert!(matches!(store.state(), StoreState::Failed(_)));
    assert!(matches!(store.get_all_fishes().await, Err(AquaError::NotInitialized)));

    std::fs::remove_file(&blocker).unwrap();
    store.initialize().await.unwrap();
    assert_eq!(store.state(), StoreState::Ready);
    assert_eq!(store.open_count(), 1);
}

#[tokio::test]
async fn test_abandoned_initialize_resets_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = AquaStore::file(dir.path().join("nested").join("aquasentry.db"));

    // A zero timeout drops the open right after its first poll.
    let _ = tokio::time::timeout(std::time::Duration::ZERO, store.initialize()).await;
    assert_ne!(store.state(), StoreState::Initializing);

    store.initialize().await.unwrap();
    assert_eq!(store.state(), StoreState::Ready);
}

#[tokio::test]
async fn test_create_tank_returns_persisted_row() {
    let store = create_test_store().await;

    let tank = store
        .create_tank(NewTank {
            ph: Some(7.1),
            temperature: Some(27.0),
            ..NewTank::named("Grow-out")
        })
        .await
        .unwrap();

    assert!(tank.id > 0);
    assert_eq!(tank.name, "Grow-out");
    assert_eq!(tank.ph, Some(7.1));
    assert_eq!(tank.ammonia, None);
    assert!(tank.created_at.ends_with('Z'));

    let stored = store.get_tank_by_id(TankId::new(tank.id)).await.unwrap();
    assert_eq!(stored, Some(tank));
}

#[tokio::test]
async fn test_create_tank_rejects_blank_name() {
    let store = create_test_store().await;
    let result = store.create_tank(NewTank::named("  ")).await;
    assert!(matches!(result, Err(AquaError::InvalidInput { field: "name", .. })));
}

#[tokio::test]
async fn test_tanks_listed_newest_first() {
    let store = create_test_store().await;
    for name in ["first", "second", "third"] {
        store.create_tank(NewTank::named(name)).await.unwrap();
    }

    let names: Vec<String> = store
        .get_all_tanks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_update_tank_patch() {
    let (store, tank_id) = create_test_store_with_tank().await;
    store
        .update_tank(
            tank_id,
            TankPatch {
                ph: Some(Some(6.8)),
                ..TankPatch::default()
            },
        )
        .await
        .unwrap();

    store
        .update_tank(
            tank_id,
            TankPatch {
                name: Some("Tank B".to_string()),
                ph: Some(None),
                nitrite: Some(Some(0.25)),
                ..TankPatch::default()
            },
        )
        .await
        .unwrap();

    let tank = store.get_tank_by_id(tank_id).await.unwrap().unwrap();
    assert_eq!(tank.name, "Tank B");
    assert_eq!(tank.ph, None);
    assert_eq!(tank.nitrite, Some(0.25));
}

#[tokio::test]
async fn test_update_missing_tank_is_not_found() {
    let store = create_test_store().await;
    let result = store
        .update_tank(
            TankId::new(404),
            TankPatch {
                name: Some("Ghost".to_string()),
                ..TankPatch::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AquaError::NotFound { entity: "tank", id: 404 })));
}

#[tokio::test]
async fn test_empty_patch_skips_store() {
    let store = create_test_store().await;
    // No row 404 exists, but an empty patch never reaches SQL.
    store.update_tank(TankId::new(404), TankPatch::default()).await.unwrap();
    store.update_fish(FishId::new(404), FishPatch::default()).await.unwrap();
}

#[tokio::test]
async fn test_create_and_get_fish() {
    let (store, tank_id) = create_test_store_with_tank().await;

    let fish = store
        .create_fish(NewFish::new("Tilapia", 6, 15.5).in_tank(tank_id))
        .await
        .unwrap();
    assert_eq!(fish.tank_id, Some(tank_id.as_i64()));

    let stored = store.get_fish_by_id(FishId::new(fish.id)).await.unwrap().unwrap();
    assert_eq!(stored.species, "Tilapia");
    assert_eq!(stored.age, 6);
    assert_eq!(stored.size, 15.5);
    assert_eq!(stored.tank_id, Some(tank_id.as_i64()));
}

#[tokio::test]
async fn test_get_missing_fish_is_none() {
    let store = create_test_store().await;
    assert!(store.get_fish_by_id(FishId::new(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fish_with_unknown_tank_fails_foreign_key() {
    let store = create_test_store().await;
    let result = store
        .create_fish(NewFish::new("Carp", 2, 8.0).in_tank(TankId::new(999)))
        .await;
    assert!(matches!(result, Err(AquaError::StoreOperationFailed(_))));
    assert_eq!(store.table_counts().await.unwrap().fishes, 0);
}

#[tokio::test]
async fn test_update_fish_moves_and_unassigns() {
    let (store, tank_a) = create_test_store_with_tank().await;
    let tank_b = TankId::new(store.create_tank(NewTank::named("Tank B")).await.unwrap().id);
    let fish = store
        .create_fish(NewFish::new("Tilapia", 6, 15.5).in_tank(tank_a))
        .await
        .unwrap();
    let fish_id = FishId::new(fish.id);

    store
        .update_fish(
            fish_id,
            FishPatch {
                tank_id: Some(Some(tank_b)),
                size: Some(16.0),
                ..FishPatch::default()
            },
        )
        .await
        .unwrap();
    let moved = store.get_fish_by_id(fish_id).await.unwrap().unwrap();
    assert_eq!(moved.tank_id, Some(tank_b.as_i64()));
    assert_eq!(moved.size, 16.0);
    assert_eq!(moved.age, 6);

    store
        .update_fish(
            fish_id,
            FishPatch {
                tank_id: Some(None),
                ..FishPatch::default()
            },
        )
        .await
        .unwrap();
    let unassigned = store.get_fish_by_id(fish_id).await.unwrap().unwrap();
    assert_eq!(unassigned.tank_id, None);
}

#[tokio::test]
async fn test_fish_count_by_tank() {
    let (store, tank_a) = create_test_store_with_tank().await;
    let tank_b = TankId::new(store.create_tank(NewTank::named("Tank B")).await.unwrap().id);

    for (species, tank) in [("Tilapia", Some(tank_a)), ("Carp", Some(tank_a)), ("Pacu", None)] {
        let mut fish = NewFish::new(species, 3, 10.0);
        fish.tank_id = tank;
        store.create_fish(fish).await.unwrap();
    }

    assert_eq!(store.get_fish_count_by_tank_id(tank_a).await.unwrap(), 2);
    assert_eq!(store.get_fish_count_by_tank_id(tank_b).await.unwrap(), 0);
    assert_eq!(store.get_fish_count_by_tank_id(TankId::new(12345)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_tank_sets_fish_tank_to_null() {
    let (store, tank_id) = create_test_store_with_tank().await;
    let mut fish_ids = Vec::new();
    for species in ["Tilapia", "Carp", "Pacu"] {
        let fish = store
            .create_fish(NewFish::new(species, 4, 12.0).in_tank(tank_id))
            .await
            .unwrap();
        fish_ids.push(FishId::new(fish.id));
    }

    store.delete_tank(tank_id).await.unwrap();

    assert!(store.get_tank_by_id(tank_id).await.unwrap().is_none());
    assert_eq!(store.table_counts().await.unwrap().fishes, 3);
    for fish_id in fish_ids {
        let fish = store.get_fish_by_id(fish_id).await.unwrap().unwrap();
        assert_eq!(fish.tank_id, None);
    }
}

#[tokio::test]
async fn test_delete_missing_rows_is_quiet() {
    let store = create_test_store().await;
    store.delete_tank(TankId::new(7)).await.unwrap();
    store.delete_fish(FishId::new(7)).await.unwrap();
}

#[tokio::test]
async fn test_delete_fish() {
    let store = create_test_store().await;
    let fish = store.create_fish(NewFish::new("Tilapia", 6, 15.5)).await.unwrap();

    store.delete_fish(FishId::new(fish.id)).await.unwrap();

    assert!(store.get_all_fishes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_supplies_create_and_list() {
    let store = create_test_store().await;
    store.create_supply(NewSupply::new("Pellets", 12.5)).await.unwrap();
    store.create_supply(NewSupply::new("Salt", 3.0)).await.unwrap();

    let supplies = store.get_all_supplies().await.unwrap();
    assert_eq!(supplies.len(), 2);
    assert_eq!(supplies[0].name, "Salt");
    assert_eq!(supplies[1].quantity, 12.5);

    let result = store.create_supply(NewSupply::new("Bad", f64::INFINITY)).await;
    assert!(matches!(result, Err(AquaError::InvalidInput { field: "quantity", .. })));
}

#[tokio::test]
async fn test_table_counts() {
    let (store, tank_id) = create_test_store_with_tank().await;
    store
        .create_fish(NewFish::new("Tilapia", 6, 15.5).in_tank(tank_id))
        .await
        .unwrap();
    store.create_supply(NewSupply::new("Pellets", 1.0)).await.unwrap();

    let counts = store.table_counts().await.unwrap();
    assert_eq!(
        counts,
        TableCounts {
            tanks: 1,
            fishes: 1,
            supplies: 1
        }
    );
}

#[tokio::test]
async fn test_reset_clears_all_tables() {
    let (store, tank_id) = create_test_store_with_tank().await;
    store
        .create_fish(NewFish::new("Tilapia", 6, 15.5).in_tank(tank_id))
        .await
        .unwrap();

    store.reset().await.unwrap();

    assert_eq!(store.table_counts().await.unwrap(), TableCounts::default());
}

#[tokio::test]
async fn test_file_store_keeps_rows_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("aquasentry.db");

    {
        let store = AquaStore::file(&path);
        store.initialize().await.unwrap();
        store.create_tank(NewTank::named("Durable")).await.unwrap();
    }

    let store = AquaStore::file(&path);
    store.initialize().await.unwrap();
    let tanks = store.get_all_tanks().await.unwrap();
    assert_eq!(tanks.len(), 1);
    assert_eq!(tanks[0].name, "Durable");
}

#[tokio::test]
async fn test_reset_option_drops_rows_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aquasentry.db");

    {
        let store = AquaStore::file(&path);
        store.initialize().await.unwrap();
        store.create_tank(NewTank::named("Ephemeral")).await.unwrap();
    }

    let store = AquaStore::new(
        DatabaseLocation::File(path),
        StoreOptions { reset_schema: true },
    );
    store.initialize().await.unwrap();
    assert!(store.get_all_tanks().await.unwrap().is_empty());
}
