//! ID types for AquaSentry records.

use crate::error::{AquaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for tank row IDs.
///
/// Keeps tank IDs from being mixed up with fish or supply IDs, which share
/// the same underlying SQLite integer type.
///
/// # Examples
///
/// ```rust
/// use aquasentry::TankId;
///
/// let tank_id = TankId::new(42);
/// assert_eq!(tank_id.as_i64(), 42);
/// assert_eq!(tank_id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TankId(pub i64);

impl TankId {
    /// Create a new TankId from a row ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying row ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TankId {
    type Err = AquaError;

    fn from_str(s: &str) -> Result<Self> {
        parse_row_id("tank id", s).map(Self)
    }
}

/// Type-safe wrapper for fish row IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FishId(pub i64);

impl FishId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FishId {
    type Err = AquaError;

    fn from_str(s: &str) -> Result<Self> {
        parse_row_id("fish id", s).map(Self)
    }
}

/// Type-safe wrapper for supply row IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplyId(pub i64);

impl SupplyId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SupplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_row_id(field: &'static str, s: &str) -> Result<i64> {
    let id: i64 = s
        .trim()
        .parse()
        .map_err(|_| AquaError::invalid(field, format!("{s:?} is not an integer")))?;
    if id <= 0 {
        return Err(AquaError::invalid(field, "must be positive"));
    }
    Ok(id)
}
