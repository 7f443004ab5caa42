//! Level bands used to colour the gauge

use serde::Serialize;
use std::fmt;

/// Gauge colour before the first reading arrives
pub const PENDING_COLOR: &str = "#0066cc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LevelBand {
    /// 75% and above
    Adequate,
    /// 50% to 74%
    Good,
    /// 25% to 49%
    Moderate,
    /// Below 25%
    Low,
}

impl LevelBand {
    pub fn classify(level: f64) -> Self {
        if level >= 75.0 {
            LevelBand::Adequate
        } else if level >= 50.0 {
            LevelBand::Good
        } else if level >= 25.0 {
            LevelBand::Moderate
        } else {
            LevelBand::Low
        }
    }

    /// Hex colour for the bar and the percentage text
    pub fn color(self) -> &'static str {
        match self {
            LevelBand::Adequate => "#4CAF50",
            LevelBand::Good => "#2196F3",
            LevelBand::Moderate => "#FF9800",
            LevelBand::Low => "#F44336",
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            LevelBand::Adequate => "✓ Level adequate",
            LevelBand::Good => "✓ Level good",
            LevelBand::Moderate => "⚠ Level moderate",
            LevelBand::Low => "⚠ Level low",
        }
    }

    /// True for bands that deserve the operator's attention
    pub fn needs_attention(self) -> bool {
        matches!(self, LevelBand::Moderate | LevelBand::Low)
    }
}

impl fmt::Display for LevelBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_text())
    }
}
