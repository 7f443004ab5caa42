//! `fish` subcommands

use super::{AppContext, Unchanged};
use crate::cli::FishCmd;
use crate::controllers::FishListController;
use crate::error::AquaError;
use crate::models::{Fish, NewFish};
use crate::Result;

pub async fn handle_fish(ctx: &AppContext, cmd: FishCmd) -> Result<()> {
    let controller = FishListController::new(ctx.store.clone());

    match cmd {
        FishCmd::Add {
            species,
            age,
            size,
            tank,
        } => {
            let mut fish = NewFish::new(species, age, size);
            if let Some(tank) = tank {
                fish = fish.in_tank(tank);
            }
            let created = controller.add(fish).await?;
            ctx.emit(&created, |f| format!("✓ Added fish {}", describe_fish(f)))
        }
        FishCmd::List => {
            controller.mount().await?;
            ctx.emit(&controller.fishes(), |fishes| render_fishes(fishes))
        }
        FishCmd::Show { id } => {
            let fish = controller
                .fetch(id)
                .await?
                .ok_or(AquaError::NotFound {
                    entity: "fish",
                    id: id.as_i64(),
                })?;
            ctx.emit(&fish, describe_fish)
        }
        FishCmd::Edit { id, fields } => {
            let patch = fields.into_patch();
            if patch.is_empty() {
                return ctx.emit(&Unchanged::new(id), |u| {
                    format!("Nothing to change for fish {}", u.id)
                });
            }
            controller.edit(id, patch).await?;
            match controller.fetch(id).await? {
                Some(fish) => ctx.emit(&fish, |f| format!("✓ Updated fish {}", describe_fish(f))),
                None => ctx.emit(&id, |id| format!("✓ Updated fish {id}")),
            }
        }
        FishCmd::Delete { id } => {
            controller.delete(id).await?;
            ctx.emit(&id, |id| format!("✓ Deleted fish {id}"))
        }
    }
}

pub fn describe_fish(fish: &Fish) -> String {
    let home = match fish.tank_id {
        Some(tank) => format!("tank #{tank}"),
        None => "no tank".to_string(),
    };
    format!(
        "#{} {}, {} months, {} cm, {}",
        fish.id, fish.species, fish.age, fish.size, home
    )
}

pub fn render_fishes(fishes: &[Fish]) -> String {
    if fishes.is_empty() {
        return "No fish registered".to_string();
    }
    fishes
        .iter()
        .map(describe_fish)
        .collect::<Vec<_>>()
        .join("\n")
}
