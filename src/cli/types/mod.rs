//! Type-safe ID wrappers shared by the CLI and the library.

pub mod ids;

pub use ids::{FishId, SupplyId, TankId};
