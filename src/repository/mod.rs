//! Typed repositories over [`AquaStore`]
//!
//! Each repository is a stateless façade: it forwards to the store and turns
//! raw rows into entities (nullable columns into `Option`, stored ISO-8601
//! text into `DateTime<Utc>`). Store errors pass through untouched.

pub mod fish_repo;
pub mod supply_repo;
pub mod tank_repo;

pub use fish_repo::FishRepository;
pub use supply_repo::SupplyRepository;
pub use tank_repo::TankRepository;

use crate::error::Result;
use chrono::{DateTime, Utc};

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}
