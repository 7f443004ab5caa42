//! `tank` subcommands

use super::{reading, AppContext, Unchanged};
use crate::cli::args::{Reading, ReadingArgs};
use crate::cli::TankCmd;
use crate::controllers::TankListController;
use crate::models::Tank;
use crate::{Result, TankId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TankFishCount {
    pub tank_id: TankId,
    pub name: String,
    pub fishes: u64,
}

pub async fn handle_tank(ctx: &AppContext, cmd: TankCmd) -> Result<()> {
    let controller = TankListController::new(ctx.store.clone());

    match cmd {
        TankCmd::Add { name, readings } => {
            let tank = controller.add(readings.into_new_tank(name)).await?;
            ctx.emit(&tank, |t| format!("✓ Added tank {}", describe_tank(t)))
        }
        TankCmd::List => {
            controller.mount().await?;
            ctx.emit(&controller.tanks(), |tanks| render_tanks(tanks))
        }
        TankCmd::Edit {
            id,
            name,
            readings,
            clear,
        } => edit_tank(ctx, &controller, id, name, readings, &clear).await,
        TankCmd::Delete { id } => {
            controller.delete(id).await?;
            ctx.emit(&id, |id| format!("✓ Deleted tank {id}"))
        }
        TankCmd::Counts => {
            controller.mount().await?;
            let names: Vec<String> = controller.tanks().into_iter().map(|t| t.name).collect();
            let counts: Vec<TankFishCount> = controller
                .fish_counts()
                .await?
                .into_iter()
                .zip(names)
                .map(|((tank_id, fishes), name)| TankFishCount {
                    tank_id,
                    name,
                    fishes,
                })
                .collect();
            ctx.emit(&counts, |counts| render_counts(counts))
        }
    }
}

async fn edit_tank(
    ctx: &AppContext,
    controller: &TankListController,
    id: TankId,
    name: Option<String>,
    readings: ReadingArgs,
    clear: &[Reading],
) -> Result<()> {
    let patch = readings.into_patch(name, clear);
    if patch.is_empty() {
        return ctx.emit(&Unchanged::new(id), |u| {
            format!("Nothing to change for tank {}", u.id)
        });
    }

    controller.edit(id, patch).await?;
    match controller.fetch(id).await? {
        Some(tank) => ctx.emit(&tank, |t| format!("✓ Updated tank {}", describe_tank(t))),
        None => ctx.emit(&id, |id| format!("✓ Updated tank {id}")),
    }
}

pub fn describe_tank(tank: &Tank) -> String {
    format!(
        "#{} {} (pH {}, temp {}, NH3 {}, NO2 {})",
        tank.id,
        tank.name,
        reading(tank.ph),
        reading(tank.temperature),
        reading(tank.ammonia),
        reading(tank.nitrite)
    )
}

pub fn render_tanks(tanks: &[Tank]) -> String {
    if tanks.is_empty() {
        return "No tanks registered".to_string();
    }
    tanks
        .iter()
        .map(|t| format!("{}  added {}", describe_tank(t), t.created_at.format("%Y-%m-%d %H:%M")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_counts(counts: &[TankFishCount]) -> String {
    if counts.is_empty() {
        return "No tanks registered".to_string();
    }
    counts
        .iter()
        .map(|c| format!("#{} {}: {} fish", c.tank_id, c.name, c.fishes))
        .collect::<Vec<_>>()
        .join("\n")
}
