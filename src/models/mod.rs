//! Domain entities and the input/patch shapes used to create and edit them.
//!
//! - `tank`: monitored enclosures with optional water-quality readings
//! - `fish`: stock records, optionally assigned to one tank
//! - `supply`: consumables (create and list only)

pub mod fish;
pub mod supply;
pub mod tank;

pub use fish::{Fish, FishPatch, NewFish};
pub use supply::{NewSupply, Supply};
pub use tank::{NewTank, Tank, TankPatch};

use crate::error::{AquaError, Result};

/// Entities with a row identity, so list caches can find them.
pub trait Identified {
    type Id: Copy + PartialEq + std::fmt::Display;

    fn id(&self) -> Self::Id;
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AquaError::invalid(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AquaError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(AquaError::invalid(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AquaError::invalid(field, "must be a finite number"));
    }
    Ok(())
}
