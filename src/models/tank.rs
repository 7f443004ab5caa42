//! Tank entity.

use super::{require_text, Identified};
use crate::{error::Result, TankId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monitored water enclosure.
///
/// Readings are stored exactly as entered; range checking is left to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub id: TankId,
    pub name: String,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub ammonia: Option<f64>,
    pub nitrite: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Tank {
    /// Shallow-merge a patch into this tank.
    pub fn apply(&mut self, patch: &TankPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(ph) = patch.ph {
            self.ph = ph;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(ammonia) = patch.ammonia {
            self.ammonia = ammonia;
        }
        if let Some(nitrite) = patch.nitrite {
            self.nitrite = nitrite;
        }
    }
}

impl Identified for Tank {
    type Id = TankId;

    fn id(&self) -> TankId {
        self.id
    }
}

/// Fields for a tank insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTank {
    pub name: String,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub ammonia: Option<f64>,
    pub nitrite: Option<f64>,
}

impl NewTank {
    /// A tank with only a name and no readings.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)
    }
}

/// Partial update of a tank.
///
/// Outer `None` leaves a column untouched; `Some(None)` clears a reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TankPatch {
    pub name: Option<String>,
    pub ph: Option<Option<f64>>,
    pub temperature: Option<Option<f64>>,
    pub ammonia: Option<Option<f64>>,
    pub nitrite: Option<Option<f64>>,
}

impl TankPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.ph.is_none()
            && self.temperature.is_none()
            && self.ammonia.is_none()
            && self.nitrite.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AquaError;

    fn sample_tank() -> Tank {
        Tank {
            id: TankId::new(1),
            name: "Tank A".to_string(),
            ph: Some(7.2),
            temperature: Some(26.5),
            ammonia: None,
            nitrite: Some(0.1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_sets_and_clears() {
        let mut tank = sample_tank();
        let patch = TankPatch {
            name: Some("Nursery".to_string()),
            ph: Some(None),
            ammonia: Some(Some(0.02)),
            ..TankPatch::default()
        };

        tank.apply(&patch);

        assert_eq!(tank.name, "Nursery");
        assert_eq!(tank.ph, None);
        assert_eq!(tank.temperature, Some(26.5));
        assert_eq!(tank.ammonia, Some(0.02));
        assert_eq!(tank.nitrite, Some(0.1));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut tank = sample_tank();
        let before = tank.clone();
        let patch = TankPatch::default();

        assert!(patch.is_empty());
        tank.apply(&patch);
        assert_eq!(tank, before);
    }

    #[test]
    fn test_new_tank_requires_name() {
        assert!(NewTank::named("Tank A").validate().is_ok());
        assert!(matches!(
            NewTank::named("   ").validate(),
            Err(AquaError::InvalidInput { field: "name", .. })
        ));
    }

    #[test]
    fn test_readings_are_not_range_checked() {
        let tank = NewTank {
            ph: Some(-3.0),
            temperature: Some(400.0),
            ..NewTank::named("Odd readings")
        };
        assert!(tank.validate().is_ok());
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        let patch = TankPatch {
            name: Some(String::new()),
            ..TankPatch::default()
        };
        assert!(patch.validate().is_err());
    }
}
