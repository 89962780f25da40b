//! Daily calorie target for the configured user

use crate::config::AppConfig;
use fasting_tracker_core::{default_calories_for_goal, estimate_calories, EnergyUnit, Goal};
use serde::Serialize;

/// Where a daily target came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    /// Computed from the configured body profile
    Profile,
    /// Fixed preset for the goal; no profile available
    Preset,
}

/// Daily energy figures in the display unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTarget {
    pub goal: Goal,
    /// Only known when a profile is configured
    pub maintenance: Option<i64>,
    pub target: i64,
    pub unit: EnergyUnit,
    pub source: TargetSource,
}

/// Work out the daily target from config
///
/// Uses the profile when present, otherwise the preset for the fallback goal.
pub fn daily_target(config: &AppConfig) -> DailyTarget {
    let unit = config.display.energy_unit;

    match &config.profile {
        Some(profile) => {
            let estimate = estimate_calories(profile);
            DailyTarget {
                goal: profile.goal,
                maintenance: Some(unit.display_kcal(estimate.maintenance)),
                target: unit.display_kcal(estimate.target),
                unit,
                source: TargetSource::Profile,
            }
        }
        None => {
            let goal = config.display.fallback_goal;
            DailyTarget {
                goal,
                maintenance: None,
                target: unit.display_kcal(default_calories_for_goal(goal)),
                unit,
                source: TargetSource::Preset,
            }
        }
    }
}
