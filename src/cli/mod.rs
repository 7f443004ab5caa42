//! CLI argument definitions and parsing.

pub mod args;
pub mod types;

use args::{FishEditArgs, Reading, ReadingArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::{FishId, TankId};

#[derive(Debug, Subcommand)]
pub enum TankCmd {
    /// Register a new tank.
    Add {
        /// Tank name.
        name: String,

        #[clap(flatten)]
        readings: ReadingArgs,
    },

    /// List tanks, newest first.
    List,

    /// Change a tank's name or readings.
    Edit {
        id: TankId,

        /// New tank name.
        #[clap(long)]
        name: Option<String>,

        #[clap(flatten)]
        readings: ReadingArgs,

        /// Empty a reading (repeatable): `--clear ph --clear nitrite`.
        #[clap(long, value_enum)]
        clear: Vec<Reading>,
    },

    /// Delete a tank. Its fish stay, without a tank.
    Delete { id: TankId },

    /// Show how many fish each tank holds.
    Counts,
}

#[derive(Debug, Subcommand)]
pub enum FishCmd {
    /// Register a new fish.
    Add {
        /// Species name.
        species: String,

        /// Age in months.
        #[clap(long)]
        age: u32,

        /// Size in centimeters.
        #[clap(long)]
        size: f64,

        /// Tank the fish lives in.
        #[clap(long)]
        tank: Option<TankId>,
    },

    /// List fish, newest first.
    List,

    /// Show one fish.
    Show { id: FishId },

    /// Change a fish's details or tank.
    Edit {
        id: FishId,

        #[clap(flatten)]
        fields: FishEditArgs,
    },

    /// Delete a fish.
    Delete { id: FishId },
}

#[derive(Debug, Subcommand)]
pub enum SupplyCmd {
    /// Record a supply.
    Add {
        /// Supply name.
        name: String,

        /// Quantity on hand.
        #[clap(long)]
        quantity: f64,
    },

    /// List supplies, newest first.
    List,
}

#[derive(Debug, Subcommand)]
pub enum LevelCmd {
    /// Fetch the tank fill level once.
    Once,

    /// Keep polling the tank fill level and redraw the gauge.
    Watch {
        /// Stop after this many level updates.
        #[clap(long)]
        ticks: Option<u32>,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "aquasentry", about = "Aquaculture tank monitor and stock records")]
pub struct AquaSentry {
    /// Database file (or set `AQUASENTRY_DB_PATH`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Level endpoint URL (or set `AQUASENTRY_LEVEL_URL`).
    #[clap(long, global = true)]
    pub url: Option<String>,

    /// Poll interval in milliseconds (or set `AQUASENTRY_POLL_INTERVAL_MS`).
    #[clap(long, global = true)]
    pub interval_ms: Option<u64>,

    /// Drop and recreate all tables before running the command.
    #[clap(long, global = true)]
    pub reset_schema: bool,

    /// Output results as JSON instead of text lines.
    #[clap(long, global = true)]
    pub json: bool,

    /// More log output (repeatable).
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage tanks
    Tank {
        #[clap(subcommand)]
        cmd: TankCmd,
    },

    /// Manage fish
    Fish {
        #[clap(subcommand)]
        cmd: FishCmd,
    },

    /// Manage supplies
    Supply {
        #[clap(subcommand)]
        cmd: SupplyCmd,
    },

    /// Read the remote tank fill level
    Level {
        #[clap(subcommand)]
        cmd: LevelCmd,
    },
}
