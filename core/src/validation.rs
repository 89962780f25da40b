//! Body profile validation
//!
//! The estimator computes whatever it is given. These checks let callers
//! reject implausible form input before asking for an estimate.

use crate::energy::BodyProfile;
use thiserror::Error;

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age_years(age_years: i32) -> Result<(), String> {
    if age_years < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age_years > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Map profile field names, as the web form sends them, to their input labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weightKg" => "Current Weight",
        "heightCm" => "Height",
        "age" => "Age",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{display_label}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }
}

/// Check every numeric field of a profile, reporting the first failure
pub fn validate_profile(profile: &BodyProfile) -> Result<(), ValidationError> {
    validate_weight(profile.weight_kg).map_err(|msg| ValidationError::new("weightKg", &msg))?;
    validate_height_cm(profile.height_cm).map_err(|msg| ValidationError::new("heightCm", &msg))?;
    validate_age_years(profile.age_years).map_err(|msg| ValidationError::new("age", &msg))?;
    Ok(())
}
