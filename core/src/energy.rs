//! Daily energy estimation
//!
//! Derives maintenance calories and a goal-adjusted daily target from a
//! body profile using the Mifflin-St Jeor BMR equation and fixed activity
//! multipliers.
//!
//! Inputs are computed literally. Range checks live in
//! [`crate::validation`] and are the caller's responsibility.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex for the BMR equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity level used to scale BMR into maintenance calories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    Athlete,
    /// Any level the form sent that we don't know about
    #[serde(other)]
    Unrecognized,
}

impl ActivityLevel {
    /// Multiplier applied to BMR
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::Athlete => 1.9,
            ActivityLevel::Unrecognized => 1.3,
        }
    }

    /// Wire tag for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "SEDENTARY",
            ActivityLevel::Light => "LIGHT",
            ActivityLevel::Moderate => "MODERATE",
            ActivityLevel::Active => "ACTIVE",
            ActivityLevel::Athlete => "ATHLETE",
            ActivityLevel::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = std::convert::Infallible;

    /// Never fails: unknown tags map to [`ActivityLevel::Unrecognized`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_uppercase().as_str() {
            "SEDENTARY" => ActivityLevel::Sedentary,
            "LIGHT" => ActivityLevel::Light,
            "MODERATE" => ActivityLevel::Moderate,
            "ACTIVE" => ActivityLevel::Active,
            "ATHLETE" => ActivityLevel::Athlete,
            _ => ActivityLevel::Unrecognized,
        };
        Ok(level)
    }
}

/// What the user is eating toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Goal {
    WeightLoss,
    Maintenance,
    MuscleGain,
}

impl Goal {
    /// Multiplier applied to maintenance calories
    pub fn adjustment(&self) -> f64 {
        match self {
            Goal::WeightLoss => 0.8,
            Goal::Maintenance => 1.0,
            Goal::MuscleGain => 1.1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "WEIGHT_LOSS",
            Goal::Maintenance => "MAINTENANCE",
            Goal::MuscleGain => "MUSCLE_GAIN",
        }
    }
}

impl FromStr for Goal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WEIGHT_LOSS" => Ok(Goal::WeightLoss),
            "MAINTENANCE" => Ok(Goal::Maintenance),
            "MUSCLE_GAIN" => Ok(Goal::MuscleGain),
            _ => Err(ParseError::UnknownGoal(s.to_string())),
        }
    }
}

/// Body data supplied per estimation call
///
/// Uses the web client's field names (`age`, `heightCm`, `weightKg`). The
/// snake case names are accepted too, for config files and env overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyProfile {
    pub sex: Sex,
    #[serde(rename = "age", alias = "age_years")]
    pub age_years: i32,
    #[serde(alias = "height_cm")]
    pub height_cm: f64,
    #[serde(alias = "weight_kg")]
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

// ============================================================================
// Estimation
// ============================================================================

/// Daily energy estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyEstimate {
    /// Unrounded Basal Metabolic Rate
    pub bmr: f64,
    /// Activity multiplier used
    pub activity_factor: f64,
    /// kcal/day to hold current weight
    pub maintenance: i32,
    /// kcal/day adjusted for the goal
    pub target: i32,
}

/// Basal Metabolic Rate (Mifflin-St Jeor)
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Estimate maintenance and goal-adjusted calories for a profile
pub fn estimate_calories(profile: &BodyProfile) -> EnergyEstimate {
    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.sex,
    );
    let activity_factor = profile.activity.factor();
    let maintenance = (bmr * activity_factor).round() as i32;
    let target = (maintenance as f64 * profile.goal.adjustment()).round() as i32;

    EnergyEstimate {
        bmr,
        activity_factor,
        maintenance,
        target,
    }
}

/// Preset daily target used before a full profile is available
pub fn default_calories_for_goal(goal: Goal) -> i32 {
    match goal {
        Goal::WeightLoss => 1800,
        Goal::Maintenance => 2100,
        Goal::MuscleGain => 2400,
    }
}
