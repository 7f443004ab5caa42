//! Shared argument groups and their conversion into store inputs.

use crate::models::{FishPatch, NewTank, TankPatch};
use crate::TankId;
use clap::{Args, ValueEnum};

/// Optional water-quality readings for a tank
#[derive(Debug, Clone, Default, Args)]
pub struct ReadingArgs {
    /// Acidity index.
    #[clap(long)]
    pub ph: Option<f64>,

    /// Water temperature.
    #[clap(long)]
    pub temperature: Option<f64>,

    /// Ammonia concentration.
    #[clap(long)]
    pub ammonia: Option<f64>,

    /// Nitrite concentration.
    #[clap(long)]
    pub nitrite: Option<f64>,
}

/// A tank reading that `tank edit --clear` can reset to empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Reading {
    Ph,
    Temperature,
    Ammonia,
    Nitrite,
}

impl ReadingArgs {
    pub fn into_new_tank(self, name: String) -> NewTank {
        NewTank {
            name,
            ph: self.ph,
            temperature: self.temperature,
            ammonia: self.ammonia,
            nitrite: self.nitrite,
        }
    }

    /// Build a patch: given readings are set, `clear` ones are emptied.
    pub fn into_patch(self, name: Option<String>, clear: &[Reading]) -> TankPatch {
        let pick = |value: Option<f64>, reading: Reading| {
            if clear.contains(&reading) {
                Some(None)
            } else {
                value.map(Some)
            }
        };

        TankPatch {
            name,
            ph: pick(self.ph, Reading::Ph),
            temperature: pick(self.temperature, Reading::Temperature),
            ammonia: pick(self.ammonia, Reading::Ammonia),
            nitrite: pick(self.nitrite, Reading::Nitrite),
        }
    }
}

/// Fields accepted by `fish edit`
#[derive(Debug, Clone, Default, Args)]
pub struct FishEditArgs {
    /// New species name.
    #[clap(long)]
    pub species: Option<String>,

    /// Age in months.
    #[clap(long)]
    pub age: Option<u32>,

    /// Size in centimeters.
    #[clap(long)]
    pub size: Option<f64>,

    /// Move the fish to this tank.
    #[clap(long, conflicts_with = "no_tank")]
    pub tank: Option<TankId>,

    /// Take the fish out of its tank.
    #[clap(long)]
    pub no_tank: bool,
}

impl FishEditArgs {
    pub fn into_patch(self) -> FishPatch {
        let tank_id = if self.no_tank {
            Some(None)
        } else {
            self.tank.map(Some)
        };

        FishPatch {
            species: self.species,
            age: self.age,
            size: self.size,
            tank_id,
        }
    }
}
