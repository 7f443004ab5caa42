//! Tests for command handlers

use super::*;
use crate::cli::args::{FishEditArgs, Reading, ReadingArgs};
use crate::cli::{FishCmd, LevelCmd, SupplyCmd, TankCmd};
use crate::error::AquaError;
use crate::level::LevelState;
use crate::models::NewTank;
use crate::{FishId, TankId};
use chrono::Utc;
use serde_json::json;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

fn memory_context(as_json: bool) -> AppContext {
    AppContext::with_store(AppConfig::default(), Arc::new(AquaStore::in_memory()), as_json)
}

#[cfg(test)]
mod tank_command_tests {
    use super::*;
    use crate::commands::tank::{describe_tank, handle_tank, render_tanks};

    #[tokio::test]
    async fn test_add_then_edit_and_clear() {
        let ctx = memory_context(false);
        handle_tank(
            &ctx,
            TankCmd::Add {
                name: "Tank A".to_string(),
                readings: ReadingArgs {
                    ph: Some(7.0),
                    nitrite: Some(0.2),
                    ..ReadingArgs::default()
                },
            },
        )
        .await
        .unwrap();

        let tank = &ctx.store.get_all_tanks().await.unwrap()[0];
        let id = TankId::new(tank.id);

        handle_tank(
            &ctx,
            TankCmd::Edit {
                id,
                name: Some("Tank B".to_string()),
                readings: ReadingArgs::default(),
                clear: vec![Reading::Nitrite],
            },
        )
        .await
        .unwrap();

        let row = ctx.store.get_tank_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.name, "Tank B");
        assert_eq!(row.ph, Some(7.0));
        assert_eq!(row.nitrite, None);
    }

    #[tokio::test]
    async fn test_edit_missing_tank_fails() {
        let ctx = memory_context(true);
        let result = handle_tank(
            &ctx,
            TankCmd::Edit {
                id: TankId::new(42),
                name: Some("Ghost".to_string()),
                readings: ReadingArgs::default(),
                clear: Vec::new(),
            },
        )
        .await;
        assert!(matches!(result, Err(AquaError::NotFound { entity: "tank", id: 42 })));
    }

    #[tokio::test]
    async fn test_empty_edit_reports_unchanged() {
        let ctx = memory_context(true);
        ctx.store.initialize().await.unwrap();
        let tank = ctx.store.create_tank(NewTank::named("Tank A")).await.unwrap();
        let id = TankId::new(tank.id);

        handle_tank(
            &ctx,
            TankCmd::Edit {
                id,
                name: None,
                readings: ReadingArgs::default(),
                clear: Vec::new(),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            serde_json::to_value(Unchanged::new(id)).unwrap(),
            json!({ "id": tank.id, "changed": false })
        );
        assert_eq!(ctx.store.get_tank_by_id(id).await.unwrap().unwrap().name, "Tank A");
    }

    #[tokio::test]
    async fn test_list_counts_and_delete() {
        let ctx = memory_context(true);
        handle_tank(&ctx, TankCmd::List).await.unwrap();

        ctx.store.initialize().await.unwrap();
        let tank = ctx.store.create_tank(NewTank::named("Tank A")).await.unwrap();
        handle_tank(&ctx, TankCmd::Counts).await.unwrap();

        handle_tank(&ctx, TankCmd::Delete { id: TankId::new(tank.id) })
            .await
            .unwrap();
        assert!(ctx.store.get_all_tanks().await.unwrap().is_empty());
    }

    #[test]
    fn test_render_tanks() {
        assert_eq!(render_tanks(&[]), "No tanks registered");

        let tank = crate::models::Tank {
            id: TankId::new(3),
            name: "Nursery".to_string(),
            ph: Some(6.8),
            temperature: None,
            ammonia: Some(0.0),
            nitrite: None,
            created_at: Utc::now(),
        };
        assert_eq!(
            describe_tank(&tank),
            "#3 Nursery (pH 6.8, temp -, NH3 0, NO2 -)"
        );
        assert!(render_tanks(std::slice::from_ref(&tank)).starts_with("#3 Nursery"));
    }
}

#[cfg(test)]
mod fish_command_tests {
    use super::*;
    use crate::commands::fish::{describe_fish, handle_fish};

    #[tokio::test]
    async fn test_add_move_and_show_fish() {
        let ctx = memory_context(false);
        ctx.store.initialize().await.unwrap();
        let tank = ctx.store.create_tank(NewTank::named("Tank A")).await.unwrap();

        handle_fish(
            &ctx,
            FishCmd::Add {
                species: "Tilapia".to_string(),
                age: 6,
                size: 15.5,
                tank: Some(TankId::new(tank.id)),
            },
        )
        .await
        .unwrap();

        let fish = &ctx.store.get_all_fishes().await.unwrap()[0];
        assert_eq!(fish.tank_id, Some(tank.id));
        let id = FishId::new(fish.id);

        handle_fish(
            &ctx,
            FishCmd::Edit {
                id,
                fields: FishEditArgs {
                    no_tank: true,
                    ..FishEditArgs::default()
                },
            },
        )
        .await
        .unwrap();
        let row = ctx.store.get_fish_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.tank_id, None);

        handle_fish(&ctx, FishCmd::Show { id }).await.unwrap();
    }

    #[tokio::test]
    async fn test_show_missing_fish() {
        let ctx = memory_context(false);
        let result = handle_fish(&ctx, FishCmd::Show { id: FishId::new(9) }).await;
        assert!(matches!(result, Err(AquaError::NotFound { entity: "fish", id: 9 })));
    }

    #[tokio::test]
    async fn test_add_fish_rejects_negative_size() {
        let ctx = memory_context(false);
        let result = handle_fish(
            &ctx,
            FishCmd::Add {
                species: "Carp".to_string(),
                age: 1,
                size: -2.0,
                tank: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AquaError::InvalidInput { field: "size", .. })));
    }

    #[test]
    fn test_describe_fish() {
        let fish = crate::models::Fish {
            id: FishId::new(5),
            species: "Tilapia".to_string(),
            age: 6,
            size: 15.5,
            tank_id: None,
            created_at: Utc::now(),
        };
        assert_eq!(describe_fish(&fish), "#5 Tilapia, 6 months, 15.5 cm, no tank");
    }
}

#[cfg(test)]
mod supply_command_tests {
    use super::*;
    use crate::commands::supply::{handle_supply, render_supplies};

    #[tokio::test]
    async fn test_add_and_list_supplies() {
        let ctx = memory_context(true);
        handle_supply(
            &ctx,
            SupplyCmd::Add {
                name: "Pellets".to_string(),
                quantity: 12.0,
            },
        )
        .await
        .unwrap();
        handle_supply(&ctx, SupplyCmd::List).await.unwrap();

        let supplies = ctx.store.get_all_supplies().await.unwrap();
        assert_eq!(supplies.len(), 1);
        assert_eq!(supplies[0].name, "Pellets");
        assert_eq!(render_supplies(&[]), "No supplies recorded");
    }
}

#[cfg(test)]
mod level_command_tests {
    use super::*;
    use crate::commands::level::{handle_level, render_gauge, LevelReport};
    use crate::level::LevelBand;

    fn level_context(server: &MockServer, as_json: bool) -> AppContext {
        let config = AppConfig {
            level_url: format!("{}/data.json", server.uri()),
            poll_interval: std::time::Duration::from_millis(20),
            ..AppConfig::default()
        };
        AppContext::with_store(config, Arc::new(AquaStore::in_memory()), as_json)
    }

    #[test]
    fn test_level_report_bands() {
        let report = LevelReport::new(82.0);
        assert_eq!(report.band, LevelBand::Adequate);
        assert_eq!(report.color, "#4CAF50");
        assert_eq!(LevelReport::new(10.0).status, "⚠ Level low");
    }

    #[test]
    fn test_render_gauge_states() {
        let pending = render_gauge(0.0, &LevelState::default());
        assert!(pending.contains("--%"));
        assert!(pending.contains("#0066cc"));

        let state = LevelState {
            level: Some(50.0),
            loading: false,
            error: Some("HTTP error! Status: 500".to_string()),
            refreshing: false,
            last_update: None,
        };
        let line = render_gauge(50.0, &state);
        assert!(line.starts_with(&format!("[{}{}]", "█".repeat(10), "░".repeat(10))));
        assert!(line.contains("50%"));
        assert!(line.contains("#2196F3"));
        assert!(line.contains("Status: 500"));
    }

    #[tokio::test]
    async fn test_level_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "level": 82 })))
            .mount(&server)
            .await;

        let ctx = level_context(&server, true);
        handle_level(&ctx, LevelCmd::Once).await.unwrap();
    }

    #[tokio::test]
    async fn test_level_once_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let ctx = level_context(&server, false);
        let result = handle_level(&ctx, LevelCmd::Once).await;
        assert!(matches!(result, Err(AquaError::Fetch { status: 500 })));
    }

    #[tokio::test]
    async fn test_level_watch_stops_after_ticks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "level": 64 })))
            .mount(&server)
            .await;

        let ctx = level_context(&server, true);
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            handle_level(&ctx, LevelCmd::Watch { ticks: Some(2) }),
        )
        .await
        .expect("watch should stop on its own")
        .unwrap();

        assert!(server.received_requests().await.unwrap().len() >= 2);
    }
}
