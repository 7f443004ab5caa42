//! Fish entity.

use super::{require_non_negative, require_text, Identified};
use crate::{error::Result, FishId, TankId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stock record. `tank_id` is cleared by the store when its tank is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub id: FishId,
    pub species: String,
    /// Age in months.
    pub age: u32,
    /// Size in centimeters.
    pub size: f64,
    pub tank_id: Option<TankId>,
    pub created_at: DateTime<Utc>,
}

impl Fish {
    /// Shallow-merge a patch into this fish.
    pub fn apply(&mut self, patch: &FishPatch) {
        if let Some(species) = &patch.species {
            self.species = species.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(tank_id) = patch.tank_id {
            self.tank_id = tank_id;
        }
    }
}

impl Identified for Fish {
    type Id = FishId;

    fn id(&self) -> FishId {
        self.id
    }
}

/// Fields for a fish insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFish {
    pub species: String,
    pub age: u32,
    pub size: f64,
    pub tank_id: Option<TankId>,
}

impl NewFish {
    pub fn new(species: impl Into<String>, age: u32, size: f64) -> Self {
        Self {
            species: species.into(),
            age,
            size,
            tank_id: None,
        }
    }

    pub fn in_tank(mut self, tank_id: TankId) -> Self {
        self.tank_id = Some(tank_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_text("species", &self.species)?;
        require_non_negative("size", self.size)
    }
}

/// Partial update of a fish. `tank_id: Some(None)` unassigns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FishPatch {
    pub species: Option<String>,
    pub age: Option<u32>,
    pub size: Option<f64>,
    pub tank_id: Option<Option<TankId>>,
}

impl FishPatch {
    pub fn is_empty(&self) -> bool {
        self.species.is_none() && self.age.is_none() && self.size.is_none() && self.tank_id.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(species) = &self.species {
            require_text("species", species)?;
        }
        if let Some(size) = self.size {
            require_non_negative("size", size)?;
        }
        Ok(())
    }
}
