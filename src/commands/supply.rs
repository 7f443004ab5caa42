//! `supply` subcommands

use super::AppContext;
use crate::cli::SupplyCmd;
use crate::models::{NewSupply, Supply};
use crate::repository::SupplyRepository;
use crate::Result;

pub async fn handle_supply(ctx: &AppContext, cmd: SupplyCmd) -> Result<()> {
    ctx.store.initialize().await?;
    let repo = SupplyRepository::new(ctx.store.clone());

    match cmd {
        SupplyCmd::Add { name, quantity } => {
            let supply = repo.create(NewSupply::new(name, quantity)).await?;
            ctx.emit(&supply, |s| format!("✓ Added supply {}", describe_supply(s)))
        }
        SupplyCmd::List => {
            let supplies = repo.list().await?;
            ctx.emit(&supplies, |supplies| render_supplies(supplies))
        }
    }
}

pub fn describe_supply(supply: &Supply) -> String {
    format!("#{} {} x {}", supply.id, supply.name, supply.quantity)
}

pub fn render_supplies(supplies: &[Supply]) -> String {
    if supplies.is_empty() {
        return "No supplies recorded".to_string();
    }
    supplies
        .iter()
        .map(describe_supply)
        .collect::<Vec<_>>()
        .join("\n")
}
