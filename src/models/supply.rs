//! Supply entity. Only create and list exist for supplies.

use super::{require_finite, require_text, Identified};
use crate::{error::Result, SupplyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub id: SupplyId,
    pub name: String,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
}

impl Identified for Supply {
    type Id = SupplyId;

    fn id(&self) -> SupplyId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSupply {
    pub name: String,
    pub quantity: f64,
}

impl NewSupply {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_finite("quantity", self.quantity)
    }
}
