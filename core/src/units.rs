//! Display units
//!
//! Estimates are computed in kcal and timers in milliseconds. Conversion to
//! what the user sees happens here, at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Energy Units
// ============================================================================

/// kJ per kcal
pub const KJ_PER_KCAL: f64 = 4.184;

/// Energy unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUnit {
    #[default]
    Kcal,
    Kj,
}

impl EnergyUnit {
    /// Convert from kcal to this unit
    pub fn from_kcal(&self, kcal: f64) -> f64 {
        match self {
            EnergyUnit::Kcal => kcal,
            EnergyUnit::Kj => kcal * KJ_PER_KCAL,
        }
    }

    /// Convert whole kcal to a rounded whole amount in this unit
    pub fn display_kcal(&self, kcal: i32) -> i64 {
        self.from_kcal(kcal as f64).round() as i64
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            EnergyUnit::Kcal => "kcal",
            EnergyUnit::Kj => "kJ",
        }
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============================================================================
// Durations
// ============================================================================

/// Render milliseconds as `HH:MM:SS`
///
/// Hours are not wrapped at 24, so a 36 hour fast reads `36:00:00`.
/// Sub-second remainders are truncated and negative input reads as zero.
pub fn format_duration(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
